//! GameService: the entry point front-ends talk to.
//!
//! It owns the session store, the engine, the dice and the narrator, and
//! turns a `(session, actor, command)` triple into a [`Resolution`].

use crate::dice::{Dice, RandomDice};
use crate::engine::{Actor, GameEngine, Intent, Rejection, Resolution};
use crate::narration::{narrate_or_fallback, Narrator, OfflineNarrator, Scene};
use crate::replies;
use crate::session::{Session, SessionStore};
use crate::state::{GameState, PlayerId, SessionId};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Everything a chat user can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartGame,
    EndGame,
    Narrate,
    Help,
    Play(Intent),
}

impl From<Intent> for Command {
    fn from(intent: Intent) -> Self {
        Command::Play(intent)
    }
}

/// Service-wide settings.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Sessions untouched for longer than this are evicted by
    /// [`GameService::evict_idle`]. `None` keeps them forever.
    pub idle_timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }
}

pub struct GameService {
    store: SessionStore,
    engine: GameEngine,
    dice: Mutex<Box<dyn Dice + Send>>,
    narrator: Box<dyn Narrator>,
    config: ServiceConfig,
}

impl GameService {
    /// A service with random dice and no storyteller.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(RandomDice::from_entropy()),
            Box::new(OfflineNarrator),
        )
    }

    pub fn with_parts(
        config: ServiceConfig,
        dice: Box<dyn Dice + Send>,
        narrator: Box<dyn Narrator>,
    ) -> Self {
        Self {
            store: SessionStore::new(),
            engine: GameEngine::new(),
            dice: Mutex::new(dice),
            narrator,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Handle one command to completion.
    pub async fn handle(&self, session: SessionId, actor: &Actor, command: Command) -> Resolution {
        debug!(%session, player = %actor.id, ?command, "handling command");
        match command {
            Command::Help => Resolution::new().line(replies::HELP),
            Command::StartGame => self.start_game(session).await,
            Command::EndGame => self.end_game(session).await,
            Command::Narrate => self.narrate(session).await,
            Command::Play(intent) => self.play(session, actor, intent).await,
        }
    }

    async fn start_game(&self, session: SessionId) -> Resolution {
        match self.store.create(session).await {
            Some(_) => {
                info!(%session, "game started");
                Resolution::new().line(replies::GAME_STARTED)
            }
            None => Resolution::rejected(Rejection::AlreadyStarted),
        }
    }

    async fn end_game(&self, session: SessionId) -> Resolution {
        match self.store.remove(session).await {
            Some(_) => {
                info!(%session, "game ended");
                Resolution::new().line(replies::GAME_ENDED)
            }
            None => Resolution::rejected(Rejection::NotStarted),
        }
    }

    async fn narrate(&self, session: SessionId) -> Resolution {
        let Some(handle) = self.store.get(session).await else {
            return Resolution::rejected(Rejection::NotStarted);
        };
        let mut session = handle.lock().await;
        session.touch();

        let Some(scene) = Scene::capture(&session.state) else {
            return Resolution::rejected(Rejection::NoPlayers);
        };
        // The session stays locked across the call so no action on this room
        // can interleave with the narration.
        let story = narrate_or_fallback(self.narrator.as_ref(), &scene).await;
        Resolution::new().line(story)
    }

    async fn play(&self, session: SessionId, actor: &Actor, intent: Intent) -> Resolution {
        let Some(handle) = self.store.get(session).await else {
            return Resolution::rejected(Rejection::NotStarted);
        };
        let mut session = handle.lock().await;
        session.touch();
        self.resolve(&mut session, actor, intent).await
    }

    async fn resolve(&self, session: &mut Session, actor: &Actor, intent: Intent) -> Resolution {
        let mut dice = self.dice.lock().await;
        self.engine
            .resolve(&mut session.state, actor, intent, &mut **dice)
    }

    /// Follow-up intents available to `player`, or `None` without a session.
    pub async fn legal_actions(&self, session: SessionId, player: PlayerId) -> Option<Vec<Intent>> {
        let handle = self.store.get(session).await?;
        let session = handle.lock().await;
        Some(self.engine.legal_actions(&session.state, player))
    }

    /// A copy of a session's state.
    pub async fn snapshot(&self, session: SessionId) -> Option<GameState> {
        let handle = self.store.get(session).await?;
        let session = handle.lock().await;
        Some(session.state.clone())
    }

    pub async fn is_running(&self, session: SessionId) -> bool {
        self.store.contains(session).await
    }

    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Evict sessions idle past the configured timeout. Does nothing when no
    /// timeout is configured.
    pub async fn evict_idle(&self) -> Vec<SessionId> {
        let Some(timeout) = self.config.idle_timeout else {
            return Vec::new();
        };
        let evicted = self.store.evict_idle(timeout).await;
        if !evicted.is_empty() {
            info!(count = evicted.len(), "evicted idle sessions");
        }
        evicted
    }
}
