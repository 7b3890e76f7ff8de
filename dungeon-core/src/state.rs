//! Per-session game state: roster, turn order and the active encounter.

use crate::character::Character;
use crate::monster::Monster;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a chat room hosting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub i64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a chat user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub character: Character,
    pub initiative: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, initiative: u32) -> Self {
        Self {
            id,
            name: name.into(),
            character: Character::placeholder(initiative),
            initiative,
        }
    }

    pub fn has_class(&self) -> bool {
        self.character.class().is_some()
    }

    /// One-line status used by the `state` command.
    pub fn status_line(&self) -> String {
        format!(
            "Player {}: {}, initiative: {}",
            self.name, self.character, self.initiative
        )
    }
}

/// A monster together with the player it is fighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub monster: Monster,
    pub opponent: PlayerId,
}

/// Everything that belongs to one running game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    players: HashMap<PlayerId, Player>,
    turn_order: Vec<PlayerId>,
    current_turn: usize,
    encounter: Option<Encounter>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- roster ------------------------------------------------------------

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.turn_order.iter().filter_map(|id| self.players.get(id))
    }

    /// Add a player at the end of the turn order. Returns false if the id is
    /// already seated.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.players.contains_key(&player.id) {
            return false;
        }
        self.turn_order.push(player.id);
        self.players.insert(player.id, player);
        true
    }

    /// Remove a player from the roster and the turn order.
    ///
    /// The turn index keeps pointing at the same player when an earlier seat
    /// is removed. When the current seat itself is removed the turn passes to
    /// the seat after it, wrapping to the front. An encounter bound to the
    /// removed player is dropped.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.players.remove(&id)?;

        if let Some(position) = self.turn_order.iter().position(|seat| *seat == id) {
            self.turn_order.remove(position);
            if position < self.current_turn {
                self.current_turn -= 1;
            }
            if self.current_turn >= self.turn_order.len() {
                self.current_turn = 0;
            }
        }

        if self.encounter.as_ref().is_some_and(|e| e.opponent == id) {
            self.encounter = None;
        }

        Some(player)
    }

    // ---- turns -------------------------------------------------------------

    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    pub fn current_turn_index(&self) -> usize {
        self.current_turn
    }

    /// The player whose turn it is.
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.turn_order.get(self.current_turn).copied()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id().and_then(|id| self.players.get(&id))
    }

    pub fn is_turn_of(&self, id: PlayerId) -> bool {
        self.current_player_id() == Some(id)
    }

    /// Pass the turn to the next seat, wrapping around.
    pub fn advance_turn(&mut self) -> Option<PlayerId> {
        if self.turn_order.is_empty() {
            self.current_turn = 0;
            return None;
        }
        self.current_turn = (self.current_turn + 1) % self.turn_order.len();
        self.current_player_id()
    }

    // ---- encounter -----------------------------------------------------------

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn encounter_mut(&mut self) -> Option<&mut Encounter> {
        self.encounter.as_mut()
    }

    pub fn in_combat(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn begin_encounter(&mut self, monster: Monster, opponent: PlayerId) {
        self.encounter = Some(Encounter { monster, opponent });
    }

    pub fn end_encounter(&mut self) -> Option<Encounter> {
        self.encounter.take()
    }

    /// The monster and the player fighting it, if `id` is in a fight.
    pub fn combatants_mut(&mut self, id: PlayerId) -> Option<(&mut Monster, &mut Player)> {
        let encounter = self.encounter.as_mut().filter(|e| e.opponent == id)?;
        let player = self.players.get_mut(&id)?;
        Some((&mut encounter.monster, player))
    }
}
