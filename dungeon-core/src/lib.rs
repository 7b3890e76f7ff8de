//! Turn-based dungeon crawl for chat rooms, with AI narration.
//!
//! This crate provides:
//! - Warrior, Mage and Rogue characters, monsters, a shop and a spellbook
//! - A turn/combat engine that resolves intents into effects and replies
//! - A session store keyed by chat room and a [`GameService`] front-ends call
//! - A narration port with a Claude-backed implementation
//!
//! # Quick Start
//!
//! ```ignore
//! use dungeon_core::{Actor, Command, GameService, Intent, PlayerId, ServiceConfig, SessionId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = GameService::new(ServiceConfig::default());
//!     let room = SessionId(-100123);
//!     let ann = Actor::new(PlayerId(42), "Ann");
//!
//!     service.handle(room, &ann, Command::StartGame).await;
//!     let joined = service.handle(room, &ann, Intent::Join.into()).await;
//!     for line in joined.lines {
//!         println!("{line}");
//!     }
//! }
//! ```

pub mod character;
pub mod dice;
pub mod engine;
pub mod items;
pub mod monster;
pub mod narration;
pub mod replies;
pub mod service;
pub mod session;
pub mod spells;
pub mod state;
pub mod testing;

// Primary public API
pub use character::{Character, CharacterClass, CombatOption};
pub use dice::{Dice, DieType, RandomDice};
pub use engine::{Actor, Effect, GameEngine, Intent, Rejection, Resolution};
pub use narration::{ClaudeNarrator, NarrationError, Narrator, NarratorConfig, OfflineNarrator};
pub use service::{Command, GameService, ServiceConfig};
pub use state::{GameState, PlayerId, SessionId};
pub use testing::{MockNarrator, ScriptedDice, TestTable};
