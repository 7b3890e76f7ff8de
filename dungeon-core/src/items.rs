//! Shop catalog.
//!
//! The catalog is process-wide static data. Characters carry clones of the
//! entries they bought; an entry is consumed when used.

use crate::character::Character;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ItemId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Potion,
    Weapon,
    Armor,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Potion => "potion",
            ItemCategory::Weapon => "weapon",
            ItemCategory::Armor => "armor",
        }
    }
}

/// What happens to a character who uses an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    Heal(u32),
    Strength(u32),
    Armor(u32),
}

impl ItemEffect {
    /// Apply the effect and describe the result.
    pub fn apply(&self, character: &mut Character) -> String {
        match *self {
            ItemEffect::Heal(amount) => {
                let healed = character.heal(amount);
                format!(
                    "You recover {healed} HP ({}/{}).",
                    character.hp(),
                    character.max_hp()
                )
            }
            ItemEffect::Strength(amount) => {
                character.increase_strength(amount);
                format!(
                    "Your strength rises by {amount} to {}.",
                    character.strength()
                )
            }
            ItemEffect::Armor(amount) => {
                character.increase_armor(amount);
                format!("Your armor rises by {amount} to {}.", character.armor())
            }
        }
    }
}

/// A purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    /// Price in gold.
    pub price: u32,
    pub effect: ItemEffect,
}

impl Item {
    fn new(
        id: ItemId,
        name: &str,
        description: &str,
        category: ItemCategory,
        price: u32,
        effect: ItemEffect,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            category,
            price,
            effect,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) - {} gold: {}",
            self.id,
            self.name,
            self.category.name(),
            self.price,
            self.description
        )
    }
}

lazy_static::lazy_static! {
    /// Everything the shop sells.
    pub static ref SHOP_ITEMS: Vec<Item> = vec![
        Item::new(1, "Health Potion", "Restores 50 HP.", ItemCategory::Potion, 30, ItemEffect::Heal(50)),
        Item::new(2, "Iron Sword", "Increases strength by 2.", ItemCategory::Weapon, 100, ItemEffect::Strength(2)),
        Item::new(3, "Leather Armor", "Increases armor by 2.", ItemCategory::Armor, 80, ItemEffect::Armor(2)),
    ];
}

/// Look up a catalog entry by id.
pub fn find_item(id: ItemId) -> Option<&'static Item> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}
