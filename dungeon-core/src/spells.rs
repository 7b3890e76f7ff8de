//! Spells a mage can cast in combat.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chance, in percent, that a successful cast sharpens the caster's mind.
pub const INTELLIGENCE_REWARD_CHANCE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub damage: u32,
    pub mana_cost: u32,
}

impl Spell {
    fn new(name: &str, damage: u32, mana_cost: u32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            mana_cost,
        }
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} damage, {} mana)",
            self.name, self.damage, self.mana_cost
        )
    }
}

lazy_static::lazy_static! {
    pub static ref SPELLBOOK: Vec<Spell> = vec![
        Spell::new("Fire Rays", 20, 15),
        Spell::new("Frost Bolt", 12, 8),
        Spell::new("Lightning Strike", 30, 25),
    ];
}

/// Find a spell by name, ignoring case.
pub fn find_spell(name: &str) -> Option<&'static Spell> {
    let name = name.trim();
    SPELLBOOK
        .iter()
        .find(|spell| spell.name.eq_ignore_ascii_case(name))
}
