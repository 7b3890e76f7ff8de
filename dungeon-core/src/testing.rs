//! Testing utilities for the dungeon game.
//!
//! This module provides tools for integration testing:
//! - `ScriptedDice` for fully deterministic rolls
//! - `MockNarrator` for narration without API calls
//! - `TestTable` for driving a scripted game through the service
//! - Assertion helpers for verifying resolutions and state

use crate::character::CharacterClass;
use crate::dice::Dice;
use crate::engine::{Actor, Intent, Rejection, Resolution};
use crate::narration::{NarrationError, Narrator, Scene};
use crate::service::{Command, GameService, ServiceConfig};
use crate::state::{GameState, PlayerId, SessionId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Dice that return pre-scripted values.
///
/// Each call to [`Dice::between`] takes the next value and clamps it into the
/// requested range, so a script written as raw die faces reads naturally.
/// An exhausted script yields the low end of every range.
///
/// Clones share the same script, which lets a test keep a handle after the
/// dice have been moved into a service.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: Arc<Mutex<VecDeque<u32>>>,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.into_iter().collect())),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Append values to the script.
    pub fn push(&self, values: impl IntoIterator<Item = u32>) {
        lock(&self.values).extend(values);
    }

    pub fn remaining(&self) -> usize {
        lock(&self.values).len()
    }
}

impl Dice for ScriptedDice {
    fn between(&mut self, low: u32, high: u32) -> u32 {
        match lock(&self.values).pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => low,
        }
    }
}

/// A narrator that returns scripted stories and records every scene.
#[derive(Debug, Clone, Default)]
pub struct MockNarrator {
    stories: Arc<Mutex<VecDeque<String>>>,
    scenes: Arc<Mutex<Vec<Scene>>>,
    failing: bool,
}

impl MockNarrator {
    pub fn new(stories: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            stories: Arc::new(Mutex::new(stories.into_iter().map(Into::into).collect())),
            ..Self::default()
        }
    }

    /// A narrator whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Queue another story.
    pub fn queue(&self, story: impl Into<String>) {
        lock(&self.stories).push_back(story.into());
    }

    /// Scenes narrated so far.
    pub fn scenes(&self) -> Vec<Scene> {
        lock(&self.scenes).clone()
    }
}

#[async_trait]
impl Narrator for MockNarrator {
    async fn narrate(&self, scene: &Scene) -> Result<String, NarrationError> {
        lock(&self.scenes).push(scene.clone());
        if self.failing {
            return Err(NarrationError::Unavailable);
        }
        let story = lock(&self.stories).pop_front();
        Ok(story.unwrap_or_else(|| "The storyteller has no more scripted stories.".to_string()))
    }
}

/// A game in a single chat room, driven through [`GameService`].
pub struct TestTable {
    pub service: GameService,
    pub dice: ScriptedDice,
    pub narrator: MockNarrator,
    pub session: SessionId,
}

impl TestTable {
    pub fn new() -> Self {
        Self::with_narrator(MockNarrator::default())
    }

    pub fn with_narrator(narrator: MockNarrator) -> Self {
        Self::with_config(ServiceConfig::default(), narrator)
    }

    pub fn with_config(config: ServiceConfig, narrator: MockNarrator) -> Self {
        let dice = ScriptedDice::empty();
        let service = GameService::with_parts(
            config,
            Box::new(dice.clone()),
            Box::new(narrator.clone()),
        );
        Self {
            service,
            dice,
            narrator,
            session: SessionId(-1001),
        }
    }

    /// Queue dice values for the following commands.
    pub fn roll(&self, values: impl IntoIterator<Item = u32>) -> &Self {
        self.dice.push(values);
        self
    }

    pub fn actor(id: i64) -> Actor {
        Actor::new(PlayerId(id), format!("P{id}"))
    }

    pub async fn command(&self, player: i64, command: Command) -> Resolution {
        self.service
            .handle(self.session, &Self::actor(player), command)
            .await
    }

    pub async fn act(&self, player: i64, intent: Intent) -> Resolution {
        self.command(player, Command::Play(intent)).await
    }

    pub async fn start(&self) -> Resolution {
        self.command(0, Command::StartGame).await
    }

    /// Join with a fixed initiative roll.
    pub async fn join(&self, player: i64, initiative: u32) -> Resolution {
        self.roll([initiative]);
        self.act(player, Intent::Join).await
    }

    /// Start the game and seat `players` with the given classes, in order.
    pub async fn seat(&self, players: &[(i64, CharacterClass)]) {
        self.start().await;
        for (id, class) in players {
            self.join(*id, 10).await;
            self.act(*id, Intent::SelectClass(*class)).await;
        }
    }

    pub async fn state(&self) -> GameState {
        self.service
            .snapshot(self.session)
            .await
            .unwrap_or_default()
    }

    pub async fn hp(&self, player: i64) -> Option<u32> {
        self.state()
            .await
            .player(PlayerId(player))
            .map(|p| p.character.hp())
    }

    pub async fn gold(&self, player: i64) -> Option<u32> {
        self.state()
            .await
            .player(PlayerId(player))
            .map(|p| p.character.gold())
    }
}

impl Default for TestTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that a resolution was refused for the given reason.
#[track_caller]
pub fn assert_rejected(resolution: &Resolution, expected: Rejection) {
    assert_eq!(
        resolution.rejection.as_ref(),
        Some(&expected),
        "Expected rejection '{expected}', got lines {:?}",
        resolution.lines
    );
}

/// Assert that a resolution went through.
#[track_caller]
pub fn assert_accepted(resolution: &Resolution) {
    assert!(
        resolution.rejection.is_none(),
        "Expected the intent to be accepted, got '{}'",
        resolution.lines.join(" / ")
    );
}

/// Assert that some reply line contains `needle`.
#[track_caller]
pub fn assert_says(resolution: &Resolution, needle: &str) {
    assert!(
        resolution.lines.iter().any(|line| line.contains(needle)),
        "Expected a line containing '{needle}', got {:?}",
        resolution.lines
    );
}

/// Assert a player's hit points.
#[track_caller]
pub fn assert_hp(state: &GameState, player: PlayerId, hp: u32) {
    let actual = state.player(player).map(|p| p.character.hp());
    assert_eq!(actual, Some(hp), "Expected {player} to have {hp} HP");
}

#[track_caller]
pub fn assert_in_combat(state: &GameState) {
    assert!(state.in_combat(), "Expected to be in combat");
}

#[track_caller]
pub fn assert_not_in_combat(state: &GameState) {
    assert!(!state.in_combat(), "Expected to NOT be in combat");
}
