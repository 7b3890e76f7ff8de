//! Monsters and the encounter table.

use crate::character::{Character, DamageOutcome};
use crate::dice::Dice;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named move from a monster's repertoire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterMove {
    pub name: String,
    pub damage: u32,
    pub description: String,
}

impl MonsterMove {
    fn new(name: &str, damage: u32, description: &str) -> Self {
        Self {
            name: name.to_string(),
            damage,
            description: description.to_string(),
        }
    }
}

/// An adversary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    max_hp: u32,
    hp: u32,
    strength: u32,
    agility: u32,
    intelligence: u32,
    initiative: u32,
    description: String,
    moves: Vec<MonsterMove>,
}

/// Result of a monster's counter-attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterStrike {
    /// Damage before any mitigation.
    pub raw: u32,
    pub blocked: bool,
    pub outcome: DamageOutcome,
}

impl Monster {
    pub fn new(
        hp: u32,
        strength: u32,
        agility: u32,
        intelligence: u32,
        initiative: u32,
        description: impl Into<String>,
        moves: Vec<MonsterMove>,
    ) -> Self {
        Self {
            max_hp: hp,
            hp,
            strength,
            agility,
            intelligence,
            initiative,
            description: description.into(),
            moves,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn agility(&self) -> u32 {
        self.agility
    }

    pub fn intelligence(&self) -> u32 {
        self.intelligence
    }

    pub fn initiative(&self) -> u32 {
        self.initiative
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn moves(&self) -> &[MonsterMove] {
        &self.moves
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Take damage at face value. Returns the hit points actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.hp);
        self.hp -= taken;
        taken
    }

    /// Hit `target` for the monster's strength.
    ///
    /// A blocking target absorbs the blow with its armor and stops blocking;
    /// anyone else takes the full hit.
    pub fn attack(&self, target: &mut Character) -> MonsterStrike {
        let raw = self.strength;
        let blocked = target.lower_block();
        let outcome = if blocked {
            target.damage(raw)
        } else {
            target.take_hit(raw)
        };
        MonsterStrike {
            raw,
            blocked,
            outcome,
        }
    }
}

impl fmt::Display for Monster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monster: {} | HP: {}/{} | Strength: {} | Agility: {} | Intelligence: {} | Initiative: {}",
            self.description,
            self.hp,
            self.max_hp,
            self.strength,
            self.agility,
            self.intelligence,
            self.initiative
        )
    }
}

lazy_static::lazy_static! {
    /// Monsters a wandering party can run into.
    pub static ref BESTIARY: Vec<Monster> = vec![
        Monster::new(
            50, 10, 8, 5, 12,
            "Goblin",
            vec![
                MonsterMove::new("Slash", 10, "A quick slash with a rusty dagger."),
                MonsterMove::new("Stab", 12, "A precise stab aiming for vital points."),
            ],
        ),
        Monster::new(
            80, 15, 6, 7, 14,
            "Orc",
            vec![
                MonsterMove::new("Smash", 15, "A powerful smash with a heavy club."),
                MonsterMove::new("Roar", 0, "A fearsome roar that intimidates enemies."),
            ],
        ),
    ];
}

/// Draw a fresh monster from the bestiary.
pub fn random_monster(dice: &mut dyn Dice) -> Monster {
    BESTIARY[dice.pick(BESTIARY.len())].clone()
}
