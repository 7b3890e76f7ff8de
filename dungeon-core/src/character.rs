//! Player characters.
//!
//! A [`Character`] is created as a classless placeholder when a player joins
//! and replaced once the player picks a [`CharacterClass`]. Class-specific
//! state lives in [`ClassFeatures`]; nothing outside this module inspects the
//! variant to decide what a character may do, callers ask
//! [`Character::combat_options`] instead.

use crate::items::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Armor every warrior starts with.
pub const WARRIOR_BASE_ARMOR: u32 = 5;

/// The playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
        }
    }

    pub fn all() -> [CharacterClass; 3] {
        [
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Warrior,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown class: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warrior" => Ok(CharacterClass::Warrior),
            "mage" => Ok(CharacterClass::Mage),
            "rogue" => Ok(CharacterClass::Rogue),
            other => Err(UnknownClass(other.to_string())),
        }
    }
}

/// Class-specific resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassFeatures {
    /// Armor is a base attribute; the warrior adds the ability to brace.
    Warrior { blocking: bool },
    Mage { mana: u32, max_mana: u32 },
    Rogue { stealth: u32 },
}

impl ClassFeatures {
    pub fn class(&self) -> CharacterClass {
        match self {
            ClassFeatures::Warrior { .. } => CharacterClass::Warrior,
            ClassFeatures::Mage { .. } => CharacterClass::Mage,
            ClassFeatures::Rogue { .. } => CharacterClass::Rogue,
        }
    }
}

/// Actions a character may take while fighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOption {
    Attack,
    CastSpell,
    Block,
}

/// Result of taking damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage actually subtracted from hit points (after mitigation).
    pub taken: u32,
    pub remaining: u32,
    pub dropped_to_zero: bool,
}

/// How a basic attack lands: `strikes` separate hits of `damage` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackProfile {
    pub strikes: u32,
    pub damage: u32,
}

/// A player's character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    max_hp: u32,
    hp: u32,
    strength: u32,
    agility: u32,
    intelligence: u32,
    initiative: u32,
    armor: u32,
    gold: u32,
    inventory: Vec<Item>,
    features: Option<ClassFeatures>,
}

impl Character {
    /// The classless adventurer a player controls between joining and
    /// choosing a class.
    pub fn placeholder(initiative: u32) -> Self {
        Self {
            max_hp: 100,
            hp: 100,
            strength: 10,
            agility: 10,
            intelligence: 10,
            initiative,
            armor: 0,
            gold: 0,
            inventory: Vec::new(),
            features: None,
        }
    }

    /// Build a fresh character of the given class.
    pub fn new(class: CharacterClass, initiative: u32) -> Self {
        match class {
            CharacterClass::Mage => Self {
                max_hp: 100,
                hp: 100,
                strength: 5,
                agility: 7,
                intelligence: 15,
                initiative,
                armor: 0,
                gold: 0,
                inventory: Vec::new(),
                features: Some(ClassFeatures::Mage {
                    mana: 100,
                    max_mana: 100,
                }),
            },
            CharacterClass::Rogue => {
                let agility = 18;
                Self {
                    max_hp: 120,
                    hp: 120,
                    strength: 6,
                    agility,
                    intelligence: 10,
                    initiative,
                    armor: 0,
                    gold: 0,
                    inventory: Vec::new(),
                    features: Some(ClassFeatures::Rogue { stealth: agility }),
                }
            }
            CharacterClass::Warrior => Self {
                max_hp: 200,
                hp: 180,
                strength: 20,
                agility: 10,
                intelligence: 3,
                initiative,
                armor: WARRIOR_BASE_ARMOR,
                gold: 0,
                inventory: Vec::new(),
                features: Some(ClassFeatures::Warrior { blocking: false }),
            },
        }
    }

    /// Set current hit points, clamped to `0..=max_hp`.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    /// Set the starting purse.
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    /// Set current mana (mages only), clamped to the maximum.
    pub fn with_mana(mut self, amount: u32) -> Self {
        if let Some(ClassFeatures::Mage { mana, max_mana }) = &mut self.features {
            *mana = amount.min(*max_mana);
        }
        self
    }

    // ---- accessors -------------------------------------------------------

    pub fn class(&self) -> Option<CharacterClass> {
        self.features.as_ref().map(ClassFeatures::class)
    }

    pub fn features(&self) -> Option<&ClassFeatures> {
        self.features.as_ref()
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

    pub fn armor(&self) -> u32 {
        self.armor
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// `(current, max)` mana for mages.
    pub fn mana(&self) -> Option<(u32, u32)> {
        match self.features {
            Some(ClassFeatures::Mage { mana, max_mana }) => Some((mana, max_mana)),
            _ => None,
        }
    }

    pub fn stealth(&self) -> Option<u32> {
        match self.features {
            Some(ClassFeatures::Rogue { stealth }) => Some(stealth),
            _ => None,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(
            self.features,
            Some(ClassFeatures::Warrior { blocking: true })
        )
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    // ---- hit points ------------------------------------------------------

    /// Take damage reduced by armor, never below zero hit points.
    pub fn damage(&mut self, amount: u32) -> DamageOutcome {
        self.take_hit(amount.saturating_sub(self.armor))
    }

    /// Take damage at face value.
    pub fn take_hit(&mut self, amount: u32) -> DamageOutcome {
        let taken = amount.min(self.hp);
        self.hp -= taken;
        DamageOutcome {
            taken,
            remaining: self.hp,
            dropped_to_zero: self.hp == 0,
        }
    }

    /// Heal up to the maximum. Returns the hit points actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let old = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - old
    }

    /// Heal to full.
    pub fn restore(&mut self) -> u32 {
        self.heal(self.max_hp)
    }

    // ---- class resources -------------------------------------------------

    /// Spend mana. Fails without side effects if the pool is too small or
    /// the character is not a mage.
    pub fn use_mana(&mut self, cost: u32) -> bool {
        match &mut self.features {
            Some(ClassFeatures::Mage { mana, .. }) if *mana >= cost => {
                *mana -= cost;
                true
            }
            _ => false,
        }
    }

    /// Regain mana up to the maximum. Returns the amount regained.
    pub fn regenerate_mana(&mut self, amount: u32) -> u32 {
        match &mut self.features {
            Some(ClassFeatures::Mage { mana, max_mana }) => {
                let old = *mana;
                *mana = mana.saturating_add(amount).min(*max_mana);
                *mana - old
            }
            _ => 0,
        }
    }

    pub fn increase_strength(&mut self, amount: u32) {
        self.strength = self.strength.saturating_add(amount);
    }

    pub fn increase_intelligence(&mut self, amount: u32) {
        self.intelligence = self.intelligence.saturating_add(amount);
    }

    pub fn increase_armor(&mut self, amount: u32) {
        self.armor = self.armor.saturating_add(amount);
    }

    /// Rogues only; returns false for everyone else.
    pub fn increase_stealth(&mut self, amount: u32) -> bool {
        match &mut self.features {
            Some(ClassFeatures::Rogue { stealth }) => {
                *stealth = stealth.saturating_add(amount);
                true
            }
            _ => false,
        }
    }

    /// Brace for the next blow. Only an armored warrior can block.
    pub fn raise_block(&mut self) -> bool {
        let armored = self.armor > 0;
        match &mut self.features {
            Some(ClassFeatures::Warrior { blocking }) if armored => {
                *blocking = true;
                true
            }
            _ => false,
        }
    }

    /// Clear the blocking flag, returning whether it was set.
    pub fn lower_block(&mut self) -> bool {
        match &mut self.features {
            Some(ClassFeatures::Warrior { blocking }) => std::mem::replace(blocking, false),
            _ => false,
        }
    }

    // ---- gold and inventory ----------------------------------------------

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Withdraw gold. Fails without side effects on an insufficient balance.
    pub fn subtract_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Remove and return the first inventory entry with the given id.
    pub fn take_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.inventory.iter().position(|item| item.id == id)?;
        Some(self.inventory.remove(index))
    }

    // ---- combat ------------------------------------------------------------

    /// The character's basic attack. Rogues strike twice with their stealth,
    /// everyone else once with their strength.
    pub fn attack_profile(&self) -> AttackProfile {
        match self.features {
            Some(ClassFeatures::Rogue { stealth }) => AttackProfile {
                strikes: 2,
                damage: stealth,
            },
            _ => AttackProfile {
                strikes: 1,
                damage: self.strength,
            },
        }
    }

    /// Combat actions currently available to this character.
    pub fn combat_options(&self) -> Vec<CombatOption> {
        let mut options = vec![CombatOption::Attack];
        match self.features {
            Some(ClassFeatures::Mage { mana, .. }) if mana > 0 => {
                options.push(CombatOption::CastSpell);
            }
            Some(ClassFeatures::Warrior { .. }) if self.armor > 0 => {
                options.push(CombatOption::Block);
            }
            _ => {}
        }
        options
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(class) = self.class() {
            write!(f, "{class}: ")?;
        }
        write!(f, "HP: {}/{}", self.hp, self.max_hp)?;
        match self.features {
            Some(ClassFeatures::Warrior { .. }) => write!(f, ", Armor: {}", self.armor)?,
            Some(ClassFeatures::Mage { mana, max_mana }) => {
                write!(f, ", Mana: {mana}/{max_mana}")?
            }
            Some(ClassFeatures::Rogue { stealth }) => write!(f, ", Stealth: {stealth}")?,
            None => {}
        }
        write!(f, ", Gold: {}", self.gold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items;

    #[test]
    fn test_class_parse() {
        assert_eq!("Mage".parse::<CharacterClass>(), Ok(CharacterClass::Mage));
        assert_eq!(
            " warrior ".parse::<CharacterClass>(),
            Ok(CharacterClass::Warrior)
        );
        assert!("bard".parse::<CharacterClass>().is_err());
    }

    #[test]
    fn test_class_base_stats() {
        let warrior = Character::new(CharacterClass::Warrior, 7);
        assert_eq!((warrior.hp(), warrior.max_hp()), (180, 200));
        assert_eq!(warrior.armor(), WARRIOR_BASE_ARMOR);
        assert_eq!(warrior.initiative(), 7);

        let mage = Character::new(CharacterClass::Mage, 3);
        assert_eq!(mage.mana(), Some((100, 100)));
        assert_eq!(mage.intelligence(), 15);

        let rogue = Character::new(CharacterClass::Rogue, 12);
        assert_eq!(rogue.stealth(), Some(rogue.agility()));
        assert_eq!(rogue.max_hp(), 120);

        let placeholder = Character::placeholder(4);
        assert_eq!(placeholder.class(), None);
        assert_eq!(placeholder.hp(), 100);
    }

    #[test]
    fn test_armor_mitigates_damage() {
        let mut warrior = Character::new(CharacterClass::Warrior, 1);
        let outcome = warrior.damage(15);
        assert_eq!(outcome.taken, 10);
        assert_eq!(warrior.hp(), 170);

        // Armor cannot turn a hit into healing.
        let outcome = warrior.damage(3);
        assert_eq!(outcome.taken, 0);
        assert_eq!(warrior.hp(), 170);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut mage = Character::new(CharacterClass::Mage, 1);
        let outcome = mage.take_hit(500);
        assert_eq!(outcome.taken, 100);
        assert_eq!(mage.hp(), 0);
        assert!(outcome.dropped_to_zero);
        assert!(mage.is_defeated());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut warrior = Character::new(CharacterClass::Warrior, 1);
        assert_eq!(warrior.heal(50), 20);
        assert_eq!(warrior.hp(), 200);

        let mut rogue = Character::new(CharacterClass::Rogue, 1).with_hp(10);
        assert_eq!(rogue.restore(), 110);
        assert_eq!(rogue.hp(), rogue.max_hp());
    }

    #[test]
    fn test_use_mana() {
        let mut mage = Character::new(CharacterClass::Mage, 1).with_mana(10);
        assert!(!mage.use_mana(15));
        assert_eq!(mage.mana(), Some((10, 100)));
        assert!(mage.use_mana(10));
        assert_eq!(mage.mana(), Some((0, 100)));

        let mut warrior = Character::new(CharacterClass::Warrior, 1);
        assert!(!warrior.use_mana(0));
    }

    #[test]
    fn test_regenerate_mana_clamps() {
        let mut mage = Character::new(CharacterClass::Mage, 1).with_mana(90);
        assert_eq!(mage.regenerate_mana(40), 10);
        assert_eq!(mage.mana(), Some((100, 100)));
    }

    #[test]
    fn test_gold() {
        let mut character = Character::new(CharacterClass::Rogue, 1).with_gold(40);
        assert!(!character.subtract_gold(80));
        assert_eq!(character.gold(), 40);
        character.add_gold(60);
        assert!(character.subtract_gold(80));
        assert_eq!(character.gold(), 20);
    }

    #[test]
    fn test_stealth_only_for_rogues() {
        let mut rogue = Character::new(CharacterClass::Rogue, 1);
        assert!(rogue.increase_stealth(1));
        assert_eq!(rogue.stealth(), Some(19));

        let mut mage = Character::new(CharacterClass::Mage, 1);
        assert!(!mage.increase_stealth(1));
    }

    #[test]
    fn test_block_toggle() {
        let mut warrior = Character::new(CharacterClass::Warrior, 1);
        assert!(warrior.raise_block());
        assert!(warrior.is_blocking());
        assert!(warrior.lower_block());
        assert!(!warrior.is_blocking());
        assert!(!warrior.lower_block());

        let mut mage = Character::new(CharacterClass::Mage, 1);
        assert!(!mage.raise_block());
    }

    #[test]
    fn test_attack_profile() {
        let rogue = Character::new(CharacterClass::Rogue, 1);
        assert_eq!(
            rogue.attack_profile(),
            AttackProfile {
                strikes: 2,
                damage: 18
            }
        );

        let warrior = Character::new(CharacterClass::Warrior, 1);
        assert_eq!(
            warrior.attack_profile(),
            AttackProfile {
                strikes: 1,
                damage: 20
            }
        );
    }

    #[test]
    fn test_combat_options_by_class() {
        let warrior = Character::new(CharacterClass::Warrior, 1);
        assert_eq!(
            warrior.combat_options(),
            vec![CombatOption::Attack, CombatOption::Block]
        );

        let mage = Character::new(CharacterClass::Mage, 1);
        assert_eq!(
            mage.combat_options(),
            vec![CombatOption::Attack, CombatOption::CastSpell]
        );

        let drained = Character::new(CharacterClass::Mage, 1).with_mana(0);
        assert_eq!(drained.combat_options(), vec![CombatOption::Attack]);

        let rogue = Character::new(CharacterClass::Rogue, 1);
        assert_eq!(rogue.combat_options(), vec![CombatOption::Attack]);
    }

    #[test]
    fn test_take_item_removes_one_copy() {
        let mut character = Character::new(CharacterClass::Mage, 1);
        let potion = items::find_item(1).cloned().unwrap();
        character.add_item(potion.clone());
        character.add_item(potion);

        assert!(character.take_item(1).is_some());
        assert_eq!(character.inventory().len(), 1);
        assert!(character.take_item(2).is_none());
        assert_eq!(character.inventory().len(), 1);
    }

    #[test]
    fn test_display() {
        let mage = Character::new(CharacterClass::Mage, 1);
        let text = mage.to_string();
        assert!(text.starts_with("Mage: HP: 100/100"));
        assert!(text.contains("Mana: 100/100"));

        let warrior = Character::new(CharacterClass::Warrior, 1);
        assert!(warrior.to_string().contains("Armor: 5"));

        let rogue = Character::new(CharacterClass::Rogue, 1);
        assert!(rogue.to_string().contains("Stealth: 18"));
    }
}
