//! AI narration of the scene.
//!
//! The engine never depends on narration succeeding: [`narrate_or_fallback`]
//! turns any failure into [`replies::STORYTELLER_FALLBACK`] and logs it.

use crate::replies;
use crate::state::{GameState, Player, PlayerId};
use async_trait::async_trait;
use claude::{Claude, Request};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_SYSTEM_PROMPT: &str = "You are the storyteller of a Dungeons & Dragons style \
adventure played in a group chat. Describe the scene in two or three vivid paragraphs. \
Never invent game mechanics, dice results or numbers that are not given to you.";

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("Narration API error: {0}")]
    Api(#[from] claude::Error),

    #[error("The storyteller returned an empty story")]
    Empty,

    #[error("No storyteller is configured")]
    Unavailable,

    #[error("Failed to serialize the scene: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// What the narrator knows about a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub class: Option<String>,
    pub initiative: u32,
    pub hp: u32,
    pub max_hp: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            class: player.character.class().map(|c| c.name().to_string()),
            initiative: player.initiative,
            hp: player.character.hp(),
            max_hp: player.character.max_hp(),
        }
    }
}

/// The roster and the player whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub players: Vec<PlayerSnapshot>,
    pub current: PlayerSnapshot,
    /// The monster being fought, if any.
    pub monster: Option<String>,
}

impl Scene {
    /// Capture the scene, or `None` when nobody is seated.
    pub fn capture(state: &GameState) -> Option<Self> {
        let current = state.current_player()?;
        Some(Self {
            players: state.players().map(PlayerSnapshot::from).collect(),
            current: current.into(),
            monster: state
                .encounter()
                .map(|e| e.monster.description().to_string()),
        })
    }

    /// The user prompt sent to the model.
    pub fn prompt(&self) -> Result<String, NarrationError> {
        let roster = self
            .players
            .iter()
            .map(|p| format!("{} with initiative {} and {} HP", p.name, p.initiative, p.hp))
            .collect::<Vec<_>>()
            .join(", ");

        let mut prompt = format!(
            "You are a D&D storyteller. Based on the following situation, create an engaging \
description: the party is {roster}. It is now {}'s turn.",
            self.current.name
        );
        if let Some(monster) = &self.monster {
            prompt.push_str(&format!(" A {monster} blocks the way."));
        }
        prompt.push_str("\n\nParty details:\n");
        prompt.push_str(&serde_json::to_string_pretty(&self.players)?);
        Ok(prompt)
    }
}

/// Something that can tell the story of a scene.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, scene: &Scene) -> Result<String, NarrationError>;
}

/// Narrate, replacing any failure with the fallback text.
pub async fn narrate_or_fallback(narrator: &dyn Narrator, scene: &Scene) -> String {
    match narrator.narrate(scene).await {
        Ok(story) => story,
        Err(e) => {
            warn!(error = %e, "narration failed, using fallback");
            replies::STORYTELLER_FALLBACK.to_string()
        }
    }
}

/// Model settings for [`ClaudeNarrator`].
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    pub model: Option<String>,
    pub max_tokens: usize,
    pub temperature: Option<f32>,
    pub system_prompt: String,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 600,
            temperature: Some(0.9),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl NarratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

/// Narration backed by the Claude API.
#[derive(Debug, Clone)]
pub struct ClaudeNarrator {
    client: Claude,
    config: NarratorConfig,
}

impl ClaudeNarrator {
    pub fn new(client: Claude, config: NarratorConfig) -> Self {
        Self { client, config }
    }

    /// Build a narrator from `ANTHROPIC_API_KEY`.
    pub fn from_env(config: NarratorConfig) -> Result<Self, NarrationError> {
        Ok(Self::new(Claude::from_env()?, config))
    }

    fn request(&self, scene: &Scene) -> Result<Request, NarrationError> {
        let mut request = Request::prompt(scene.prompt()?)
            .with_system(self.config.system_prompt.clone())
            .with_max_tokens(self.config.max_tokens);
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        Ok(request)
    }
}

#[async_trait]
impl Narrator for ClaudeNarrator {
    async fn narrate(&self, scene: &Scene) -> Result<String, NarrationError> {
        let request = self.request(scene)?;
        debug!(current = %scene.current.name, "requesting narration");

        let story = self.client.stream_text(request).await?;
        let story = story.trim();
        if story.is_empty() {
            return Err(NarrationError::Empty);
        }
        Ok(story.to_string())
    }
}

/// A narrator for running without an API key. Every request falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNarrator;

#[async_trait]
impl Narrator for OfflineNarrator {
    async fn narrate(&self, _scene: &Scene) -> Result<String, NarrationError> {
        Err(NarrationError::Unavailable)
    }
}
