//! Turn and combat resolution.
//!
//! The pipeline mirrors a small rules engine:
//! 1. The front-end turns a chat command into an [`Intent`]
//! 2. [`GameEngine::resolve`] checks preconditions and applies the rules to
//!    the [`GameState`]
//! 3. A [`Resolution`] reports what happened: reply lines, the [`Effect`]s
//!    that were applied and the follow-up intents that are now legal
//!
//! A failed precondition is never an error. It produces a resolution carrying
//! a [`Rejection`] and leaves the state untouched.

use crate::character::{Character, CharacterClass, CombatOption};
use crate::dice::{Dice, DieType};
use crate::items::{self, ItemId};
use crate::monster::{self, Monster};
use crate::replies;
use crate::spells::{self, INTELLIGENCE_REWARD_CHANCE, SPELLBOOK};
use crate::state::{GameState, Player, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Highest exploration roll that leads to a monster.
pub const ENCOUNTER_THRESHOLD: u32 = 10;

/// Inclusive range of gold found in a treasure chest.
pub const TREASURE_GOLD: (u32, u32) = (50, 149);

/// What a player wants to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Join,
    SelectClass(CharacterClass),
    Explore,
    Rest,
    Shop,
    Buy(ItemId),
    Inventory,
    UseItem(ItemId),
    /// Basic attack against the current monster.
    Attack,
    /// Open the spell list.
    CastSpell,
    Block,
    CastNamedSpell(String),
    AdvanceTurn,
    State,
}

/// The player issuing an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: PlayerId,
    pub name: String,
}

impl Actor {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Why an intent was refused. The message is shown to the player as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please start the game first using the /startgame command.")]
    NotStarted,

    #[error("The game has already started. To end the game, type /endgame.")]
    AlreadyStarted,

    #[error("You are not part of the current game.")]
    NotAPlayer,

    #[error("Player {0} is already part of the game.")]
    AlreadyJoined(String),

    #[error("You have already chosen your class.")]
    ClassAlreadyChosen,

    #[error("Choose your class first.")]
    NoClass,

    #[error("It's not your turn!")]
    NotYourTurn,

    #[error("There are no players in the game.")]
    NoPlayers,

    #[error("A fight is in progress. Deal with the monster first!")]
    InCombat,

    #[error("There is no monster to fight.")]
    NoMonster,

    #[error("Only a mage with mana left can cast spells.")]
    CannotCastSpells,

    #[error("Only a warrior wearing armor can block.")]
    CannotBlock,

    #[error("There is no spell called {0}.")]
    UnknownSpell(String),

    #[error("Not enough mana. Required: {required}, available: {available}.")]
    NotEnoughMana { required: u32, available: u32 },

    #[error("Not enough gold: the {item} costs {price} gold, you are {shortfall} gold short.")]
    NotEnoughGold {
        item: String,
        price: u32,
        shortfall: u32,
    },

    #[error("The shop has no item with id {0}.")]
    UnknownItem(ItemId),

    #[error("Item {0} was not found in your inventory.")]
    ItemNotFound(ItemId),
}

/// Attributes that grow as combat rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Intelligence,
    Stealth,
}

/// A state change applied while resolving an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    DiceRolled {
        die: DieType,
        value: u32,
        purpose: String,
    },
    PlayerJoined {
        player: PlayerId,
        initiative: u32,
    },
    ClassChosen {
        player: PlayerId,
        class: CharacterClass,
    },
    GoldFound {
        player: PlayerId,
        amount: u32,
    },
    GoldSpent {
        player: PlayerId,
        amount: u32,
    },
    ItemBought {
        player: PlayerId,
        item: ItemId,
    },
    ItemUsed {
        player: PlayerId,
        item: ItemId,
    },
    Rested {
        player: PlayerId,
        hp_restored: u32,
        mana_restored: u32,
    },
    MonsterAppeared {
        player: PlayerId,
        monster: String,
    },
    MonsterDamaged {
        amount: u32,
        remaining: u32,
    },
    ManaSpent {
        player: PlayerId,
        amount: u32,
    },
    BlockRaised {
        player: PlayerId,
    },
    PlayerDamaged {
        player: PlayerId,
        amount: u32,
        remaining: u32,
        blocked: bool,
    },
    StatIncreased {
        player: PlayerId,
        stat: Stat,
        amount: u32,
    },
    MonsterDefeated {
        player: PlayerId,
        monster: String,
    },
    PlayerDefeated {
        player: PlayerId,
    },
    TurnAdvanced {
        player: PlayerId,
    },
}

/// The outcome of resolving an intent.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Reply lines, in order.
    pub lines: Vec<String>,
    pub effects: Vec<Effect>,
    /// Intents the acting player may issue next.
    pub choices: Vec<Intent>,
    /// Set when the intent was refused; nothing was changed in that case.
    pub rejection: Option<Rejection>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            lines: vec![rejection.to_string()],
            effects: Vec::new(),
            choices: Vec::new(),
            rejection: Some(rejection),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn record(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

/// Choices offered to a player who is between fights.
pub fn exploring_choices() -> Vec<Intent> {
    vec![
        Intent::Explore,
        Intent::Rest,
        Intent::Shop,
        Intent::Inventory,
        Intent::AdvanceTurn,
    ]
}

/// Choices offered to a character facing a monster.
pub fn combat_choices(character: &Character) -> Vec<Intent> {
    character
        .combat_options()
        .into_iter()
        .map(|option| match option {
            CombatOption::Attack => Intent::Attack,
            CombatOption::CastSpell => Intent::CastSpell,
            CombatOption::Block => Intent::Block,
        })
        .collect()
}

fn class_choices() -> Vec<Intent> {
    CharacterClass::all()
        .into_iter()
        .map(Intent::SelectClass)
        .collect()
}

/// Resolves intents against a session's state.
#[derive(Debug, Default)]
pub struct GameEngine;

impl GameEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an intent, mutating `state` only when it is accepted.
    pub fn resolve(
        &self,
        state: &mut GameState,
        actor: &Actor,
        intent: Intent,
        dice: &mut dyn Dice,
    ) -> Resolution {
        let result = match intent {
            Intent::Join => self.join(state, actor, dice),
            Intent::SelectClass(class) => self.select_class(state, actor, class),
            Intent::Explore => self.explore(state, actor, dice),
            Intent::Rest => self.rest(state, actor),
            Intent::Shop => self.shop(state, actor),
            Intent::Buy(item) => self.buy(state, actor, item),
            Intent::Inventory => self.inventory(state, actor),
            Intent::UseItem(item) => self.use_item(state, actor, item),
            Intent::Attack => self.attack(state, actor),
            Intent::CastSpell => self.spell_menu(state, actor),
            Intent::Block => self.block(state, actor),
            Intent::CastNamedSpell(name) => self.cast_spell(state, actor, &name, dice),
            Intent::AdvanceTurn => self.advance_turn(state),
            Intent::State => self.describe(state),
        };

        result.unwrap_or_else(|rejection| {
            debug!(player = %actor.id, %rejection, "intent rejected");
            Resolution::rejected(rejection)
        })
    }

    /// Intents `id` could issue right now, for menu presentation.
    pub fn legal_actions(&self, state: &GameState, id: PlayerId) -> Vec<Intent> {
        let Some(player) = state.player(id) else {
            return vec![Intent::Join];
        };
        if !player.has_class() {
            return class_choices();
        }
        match state.encounter() {
            Some(encounter) if encounter.opponent == id => combat_choices(&player.character),
            Some(_) => vec![Intent::Shop, Intent::Inventory, Intent::State],
            None => exploring_choices(),
        }
    }

    // ---- lobby -----------------------------------------------------------------

    fn join(
        &self,
        state: &mut GameState,
        actor: &Actor,
        dice: &mut dyn Dice,
    ) -> Result<Resolution, Rejection> {
        if state.contains(actor.id) {
            return Err(Rejection::AlreadyJoined(actor.name.clone()));
        }

        let mut res = Resolution::new();
        if state.is_empty() {
            res.say(replies::DUNGEON_INTRO);
        }

        let initiative = dice.roll(DieType::D20);
        res.record(Effect::DiceRolled {
            die: DieType::D20,
            value: initiative,
            purpose: "initiative".to_string(),
        });

        let player = Player::new(actor.id, actor.name.clone(), initiative);
        res.say(replies::player_description(&player));
        res.say(replies::player_joined(&player));
        state.add_player(player);

        res.record(Effect::PlayerJoined {
            player: actor.id,
            initiative,
        });
        res.choices = class_choices();
        debug!(player = %actor.id, initiative, "player joined");
        Ok(res)
    }

    fn select_class(
        &self,
        state: &mut GameState,
        actor: &Actor,
        class: CharacterClass,
    ) -> Result<Resolution, Rejection> {
        let player = state.player_mut(actor.id).ok_or(Rejection::NotAPlayer)?;
        if player.has_class() {
            return Err(Rejection::ClassAlreadyChosen);
        }

        player.character = Character::new(class, player.initiative);

        let mut res = Resolution::new()
            .line(player.status_line())
            .line(replies::action_prompt(&player.name));
        res.record(Effect::ClassChosen {
            player: actor.id,
            class,
        });
        res.choices = exploring_choices();
        Ok(res)
    }

    // ---- exploring ---------------------------------------------------------------

    fn explore(
        &self,
        state: &mut GameState,
        actor: &Actor,
        dice: &mut dyn Dice,
    ) -> Result<Resolution, Rejection> {
        check_turn(state, actor.id)?;
        if state.in_combat() {
            return Err(Rejection::InCombat);
        }

        let mut res = Resolution::new();
        res.say("Rolling a d20...");
        let roll = dice.roll(DieType::D20);
        res.say(format!("You rolled a {roll}."));
        res.record(Effect::DiceRolled {
            die: DieType::D20,
            value: roll,
            purpose: "exploration".to_string(),
        });

        if roll <= ENCOUNTER_THRESHOLD {
            let monster = monster::random_monster(dice);
            res.say(format!("You encounter a monster! {monster}"));
            res.say(format!("Known moves: {}.", describe_moves(&monster)));
            res.record(Effect::MonsterAppeared {
                player: actor.id,
                monster: monster.description().to_string(),
            });
            debug!(player = %actor.id, monster = monster.description(), "encounter started");
            state.begin_encounter(monster, actor.id);

            if let Some(player) = state.player(actor.id) {
                res.choices = combat_choices(&player.character);
            }
        } else {
            let (low, high) = TREASURE_GOLD;
            let gold = dice.between(low, high);
            let player = state.player_mut(actor.id).ok_or(Rejection::NotAPlayer)?;
            player.character.add_gold(gold);
            res.say(format!(
                "You find a hidden treasure chest with {gold} gold! You now have {} gold.",
                player.character.gold()
            ));
            res.record(Effect::GoldFound {
                player: actor.id,
                amount: gold,
            });
            res.choices = exploring_choices();
        }
        Ok(res)
    }

    fn rest(&self, state: &mut GameState, actor: &Actor) -> Result<Resolution, Rejection> {
        check_turn(state, actor.id)?;
        if state.in_combat() {
            return Err(Rejection::InCombat);
        }

        let player = state.player_mut(actor.id).ok_or(Rejection::NotAPlayer)?;
        let character = &mut player.character;
        let hp_restored = character.restore();
        let mana_restored = match character.mana() {
            Some((_, max)) => character.regenerate_mana(max),
            None => 0,
        };

        let mut res = Resolution::new()
            .line("You take a moment to rest and recover your strength.")
            .line(format!("{} now has {} HP.", player.name, character.hp()));
        if let Some((mana, max)) = character.mana() {
            res.say(format!("Your mana is restored to {mana}/{max}."));
        }
        res.record(Effect::Rested {
            player: actor.id,
            hp_restored,
            mana_restored,
        });
        res.choices = exploring_choices();
        Ok(res)
    }

    // ---- shop and inventory --------------------------------------------------------

    fn shop(&self, state: &GameState, actor: &Actor) -> Result<Resolution, Rejection> {
        let player = state.player(actor.id).ok_or(Rejection::NotAPlayer)?;

        let mut res = Resolution::new().line(format!(
            "Welcome to the shop! You have {} gold.",
            player.character.gold()
        ));
        for item in items::SHOP_ITEMS.iter() {
            res.say(item.to_string());
        }
        res.choices = items::SHOP_ITEMS
            .iter()
            .map(|item| Intent::Buy(item.id))
            .collect();
        Ok(res)
    }

    fn buy(&self, state: &mut GameState, actor: &Actor, id: ItemId) -> Result<Resolution, Rejection> {
        check_turn(state, actor.id)?;
        if state.in_combat() {
            return Err(Rejection::InCombat);
        }
        let item = items::find_item(id).ok_or(Rejection::UnknownItem(id))?;

        let player = state.player_mut(actor.id).ok_or(Rejection::NotAPlayer)?;
        let character = &mut player.character;
        if !character.subtract_gold(item.price) {
            return Err(Rejection::NotEnoughGold {
                item: item.name.clone(),
                price: item.price,
                shortfall: item.price - character.gold(),
            });
        }
        character.add_item(item.clone());

        let mut res = Resolution::new().line(format!(
            "You bought {} for {} gold. Remaining gold: {}.",
            item.name,
            item.price,
            character.gold()
        ));
        res.record(Effect::GoldSpent {
            player: actor.id,
            amount: item.price,
        });
        res.record(Effect::ItemBought {
            player: actor.id,
            item: id,
        });
        res.choices = exploring_choices();
        Ok(res)
    }

    fn inventory(&self, state: &GameState, actor: &Actor) -> Result<Resolution, Rejection> {
        let player = state.player(actor.id).ok_or(Rejection::NotAPlayer)?;
        let inventory = player.character.inventory();

        let mut res = Resolution::new();
        if inventory.is_empty() {
            res.say("Your inventory is empty.");
            return Ok(res);
        }

        res.say(format!("{}'s inventory:", player.name));
        for item in inventory {
            res.say(format!("[{}] {}: {}", item.id, item.name, item.description));
            let choice = Intent::UseItem(item.id);
            if !res.choices.contains(&choice) {
                res.choices.push(choice);
            }
        }
        Ok(res)
    }

    fn use_item(
        &self,
        state: &mut GameState,
        actor: &Actor,
        id: ItemId,
    ) -> Result<Resolution, Rejection> {
        check_turn(state, actor.id)?;

        let player = state.player_mut(actor.id).ok_or(Rejection::NotAPlayer)?;
        let item = player
            .character
            .take_item(id)
            .ok_or(Rejection::ItemNotFound(id))?;
        let outcome = item.effect.apply(&mut player.character);

        let mut res = Resolution::new()
            .line(format!("You use the {}.", item.name))
            .line(outcome);
        res.record(Effect::ItemUsed {
            player: actor.id,
            item: id,
        });

        res.choices = match state.encounter() {
            Some(encounter) if encounter.opponent == actor.id => state
                .player(actor.id)
                .map(|p| combat_choices(&p.character))
                .unwrap_or_default(),
            _ => exploring_choices(),
        };
        Ok(res)
    }

    // ---- combat --------------------------------------------------------------------

    fn attack(&self, state: &mut GameState, actor: &Actor) -> Result<Resolution, Rejection> {
        check_fight(state, actor.id)?;
        let (monster, player) = state
            .combatants_mut(actor.id)
            .ok_or(Rejection::NoMonster)?;

        let mut res = Resolution::new();
        let profile = player.character.attack_profile();
        for _ in 0..profile.strikes {
            monster.take_damage(profile.damage);
            res.say(format!(
                "{} strikes the {} for {} damage. ({}/{} HP left)",
                player.name,
                monster.description(),
                profile.damage,
                monster.hp(),
                monster.max_hp()
            ));
            res.record(Effect::MonsterDamaged {
                amount: profile.damage,
                remaining: monster.hp(),
            });
        }

        self.finish_exchange(state, actor.id, res)
    }

    fn spell_menu(&self, state: &GameState, actor: &Actor) -> Result<Resolution, Rejection> {
        check_fight(state, actor.id)?;
        let player = state.player(actor.id).ok_or(Rejection::NotAPlayer)?;
        if !player
            .character
            .combat_options()
            .contains(&CombatOption::CastSpell)
        {
            return Err(Rejection::CannotCastSpells);
        }

        let mana = player.character.mana().map(|(mana, _)| mana).unwrap_or(0);
        let mut res = Resolution::new().line(format!("Choose a spell ({mana} mana left):"));
        for spell in SPELLBOOK.iter() {
            res.say(spell.to_string());
        }
        res.choices = SPELLBOOK
            .iter()
            .map(|spell| Intent::CastNamedSpell(spell.name.clone()))
            .collect();
        res.choices.push(Intent::Attack);
        Ok(res)
    }

    fn cast_spell(
        &self,
        state: &mut GameState,
        actor: &Actor,
        name: &str,
        dice: &mut dyn Dice,
    ) -> Result<Resolution, Rejection> {
        check_fight(state, actor.id)?;
        let (monster, player) = state
            .combatants_mut(actor.id)
            .ok_or(Rejection::NoMonster)?;
        let character = &mut player.character;

        // Mages with no mana left fall through to NotEnoughMana.
        if character.mana().is_none() {
            return Err(Rejection::CannotCastSpells);
        }
        let spell = spells::find_spell(name).ok_or_else(|| Rejection::UnknownSpell(name.to_string()))?;
        if !character.use_mana(spell.mana_cost) {
            let available = character.mana().map(|(mana, _)| mana).unwrap_or(0);
            return Err(Rejection::NotEnoughMana {
                required: spell.mana_cost,
                available,
            });
        }

        monster.take_damage(spell.damage);

        let mut res = Resolution::new().line(format!(
            "{} casts {} at the {} for {} damage. ({}/{} HP left)",
            player.name,
            spell.name,
            monster.description(),
            spell.damage,
            monster.hp(),
            monster.max_hp()
        ));
        res.record(Effect::ManaSpent {
            player: actor.id,
            amount: spell.mana_cost,
        });
        res.record(Effect::MonsterDamaged {
            amount: spell.damage,
            remaining: monster.hp(),
        });

        if dice.chance(INTELLIGENCE_REWARD_CHANCE) {
            character.increase_intelligence(1);
            res.say(format!(
                "The spell sharpens your mind: intelligence +1 (now {}).",
                character.intelligence()
            ));
            res.record(Effect::StatIncreased {
                player: actor.id,
                stat: Stat::Intelligence,
                amount: 1,
            });
        }

        self.finish_exchange(state, actor.id, res)
    }

    fn block(&self, state: &mut GameState, actor: &Actor) -> Result<Resolution, Rejection> {
        check_fight(state, actor.id)?;
        let player = state.player_mut(actor.id).ok_or(Rejection::NotAPlayer)?;
        if !player.character.raise_block() {
            return Err(Rejection::CannotBlock);
        }

        let mut res = Resolution::new().line(format!(
            "{} raises their shield and braces for the blow.",
            player.name
        ));
        res.record(Effect::BlockRaised { player: actor.id });

        self.finish_exchange(state, actor.id, res)
    }

    /// Settle the exchange after the player acted: either the monster falls
    /// and the player is rewarded, or it strikes back once.
    fn finish_exchange(
        &self,
        state: &mut GameState,
        id: PlayerId,
        mut res: Resolution,
    ) -> Result<Resolution, Rejection> {
        let (monster, player) = state.combatants_mut(id).ok_or(Rejection::NoMonster)?;

        if monster.is_dead() {
            let name = monster.description().to_string();
            res.say(format!("The {name} is defeated!"));
            res.record(Effect::MonsterDefeated {
                player: id,
                monster: name.clone(),
            });

            // One reward per win: rogues grow stealth, everyone else strength.
            let character = &mut player.character;
            let stat = if character.increase_stealth(1) {
                res.say(format!(
                    "Victory reward: +1 stealth (now {}).",
                    character.stealth().unwrap_or_default()
                ));
                Stat::Stealth
            } else {
                character.increase_strength(1);
                res.say(format!(
                    "Victory reward: +1 strength (now {}).",
                    character.strength()
                ));
                Stat::Strength
            };
            res.record(Effect::StatIncreased {
                player: id,
                stat,
                amount: 1,
            });

            state.end_encounter();
            debug!(player = %id, monster = %name, "monster defeated");
            res.choices = exploring_choices();
            return Ok(res);
        }

        let strike = monster.attack(&mut player.character);
        if strike.blocked {
            res.say(format!(
                "The {} attacks, but {} blocks! Damage reduced from {} to {}.",
                monster.description(),
                player.name,
                strike.raw,
                strike.outcome.taken
            ));
        } else {
            res.say(format!(
                "The {} attacks {} for {} damage.",
                monster.description(),
                player.name,
                strike.outcome.taken
            ));
        }
        res.record(Effect::PlayerDamaged {
            player: id,
            amount: strike.outcome.taken,
            remaining: strike.outcome.remaining,
            blocked: strike.blocked,
        });

        if strike.outcome.dropped_to_zero {
            res.say(format!(
                "{} has been defeated by the {}!",
                player.name,
                monster.description()
            ));
            res.say(replies::player_defeated(&player.name));
            state.remove_player(id);
            res.record(Effect::PlayerDefeated { player: id });
            debug!(player = %id, "player defeated");
            return Ok(res);
        }

        res.say(format!(
            "{} has {}/{} HP remaining.",
            player.name,
            player.character.hp(),
            player.character.max_hp()
        ));
        res.choices = combat_choices(&player.character);
        Ok(res)
    }

    // ---- turns and status --------------------------------------------------------------

    fn advance_turn(&self, state: &mut GameState) -> Result<Resolution, Rejection> {
        if state.in_combat() {
            return Err(Rejection::InCombat);
        }
        let next = state.advance_turn().ok_or(Rejection::NoPlayers)?;
        let player = state.player(next).ok_or(Rejection::NoPlayers)?;

        let mut res = Resolution::new().line(replies::player_turn(&player.name));
        res.record(Effect::TurnAdvanced { player: next });
        res.choices = if player.has_class() {
            exploring_choices()
        } else {
            class_choices()
        };
        debug!(player = %next, "turn advanced");
        Ok(res)
    }

    fn describe(&self, state: &GameState) -> Result<Resolution, Rejection> {
        if state.is_empty() {
            return Err(Rejection::NoPlayers);
        }

        let mut res = Resolution::new().line("Game state:");
        for player in state.players() {
            res.say(player.status_line());
        }
        if let Some(current) = state.current_player() {
            res.say(replies::player_turn(&current.name));
        }
        if let Some(encounter) = state.encounter() {
            let fighter = state
                .player(encounter.opponent)
                .map(|p| p.name.as_str())
                .unwrap_or("Someone");
            res.say(format!("{fighter} is fighting: {}", encounter.monster));
        }
        Ok(res)
    }
}

/// The actor must be seated, have a class, and hold the turn.
fn check_turn(state: &GameState, id: PlayerId) -> Result<(), Rejection> {
    let player = state.player(id).ok_or(Rejection::NotAPlayer)?;
    if !player.has_class() {
        return Err(Rejection::NoClass);
    }
    if !state.is_turn_of(id) {
        return Err(Rejection::NotYourTurn);
    }
    Ok(())
}

/// As [`check_turn`], and the actor must be the one facing the monster.
fn check_fight(state: &GameState, id: PlayerId) -> Result<(), Rejection> {
    check_turn(state, id)?;
    match state.encounter() {
        None => Err(Rejection::NoMonster),
        Some(encounter) if encounter.opponent != id => Err(Rejection::NotYourTurn),
        Some(_) => Ok(()),
    }
}

fn describe_moves(monster: &Monster) -> String {
    monster
        .moves()
        .iter()
        .map(|m| format!("{} ({})", m.name, m.description))
        .collect::<Vec<_>>()
        .join(", ")
}
