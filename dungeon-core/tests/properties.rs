//! Property tests for the numeric and turn-order invariants.

use dungeon_core::engine::{Actor, Effect, GameEngine, Intent};
use dungeon_core::state::{GameState, Player};
use dungeon_core::{Character, CharacterClass, PlayerId, RandomDice, ScriptedDice};
use proptest::prelude::*;

fn class() -> impl Strategy<Value = CharacterClass> {
    prop_oneof![
        Just(CharacterClass::Warrior),
        Just(CharacterClass::Mage),
        Just(CharacterClass::Rogue),
    ]
}

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Explore),
        Just(Intent::Rest),
        Just(Intent::Attack),
        Just(Intent::Block),
        Just(Intent::CastSpell),
        Just(Intent::CastNamedSpell("Fire Rays".into())),
        Just(Intent::CastNamedSpell("Lightning Strike".into())),
        (1u32..=4).prop_map(Intent::Buy),
        (1u32..=4).prop_map(Intent::UseItem),
        Just(Intent::AdvanceTurn),
        Just(Intent::State),
    ]
}

#[derive(Debug, Clone)]
enum RosterOp {
    Add(i64),
    Remove(i64),
    Advance,
}

fn roster_op() -> impl Strategy<Value = RosterOp> {
    prop_oneof![
        (0i64..6).prop_map(RosterOp::Add),
        (0i64..6).prop_map(RosterOp::Remove),
        Just(RosterOp::Advance),
    ]
}

fn check_state(state: &GameState) -> Result<(), TestCaseError> {
    if state.turn_order().is_empty() {
        prop_assert_eq!(state.current_turn_index(), 0);
    } else {
        prop_assert!(state.current_turn_index() < state.turn_order().len());
    }
    prop_assert_eq!(state.turn_order().len(), state.player_count());
    for player in state.players() {
        prop_assert!(player.character.hp() <= player.character.max_hp());
        prop_assert!(player.character.hp() > 0);
    }
    if let Some(encounter) = state.encounter() {
        prop_assert!(state.contains(encounter.opponent));
        prop_assert!(encounter.monster.hp() > 0);
        prop_assert!(encounter.monster.hp() <= encounter.monster.max_hp());
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_damage_keeps_hp_in_bounds(
        class in class(),
        hits in prop::collection::vec(0u32..400, 0..20),
        heals in prop::collection::vec(0u32..400, 0..20),
    ) {
        let mut character = Character::new(class, 10);
        for (hit, heal) in hits.iter().zip(heals.iter().chain(std::iter::repeat(&0))) {
            let outcome = character.damage(*hit);
            prop_assert!(outcome.taken <= *hit);
            prop_assert!(character.hp() <= character.max_hp());
            prop_assert_eq!(outcome.dropped_to_zero, character.hp() == 0);
            character.heal(*heal);
            prop_assert!(character.hp() <= character.max_hp());
        }
    }

    #[test]
    fn prop_gold_never_overdrawn(
        deposits in prop::collection::vec(0u32..200, 0..10),
        withdrawals in prop::collection::vec(0u32..300, 0..10),
    ) {
        let mut character = Character::new(CharacterClass::Rogue, 1);
        let mut expected: u32 = 0;
        for amount in deposits {
            character.add_gold(amount);
            expected += amount;
        }
        for amount in withdrawals {
            let ok = character.subtract_gold(amount);
            prop_assert_eq!(ok, amount <= expected);
            if ok {
                expected -= amount;
            }
            prop_assert_eq!(character.gold(), expected);
        }
    }

    #[test]
    fn prop_unaffordable_purchase_changes_nothing(gold in 0u32..80) {
        let engine = GameEngine::new();
        let mut state = GameState::new();
        let actor = Actor::new(PlayerId(1), "Ann");
        let mut player = Player::new(actor.id, "Ann", 5);
        player.character = Character::new(CharacterClass::Warrior, 5).with_gold(gold);
        state.add_player(player);

        let res = engine.resolve(&mut state, &actor, Intent::Buy(3), &mut ScriptedDice::empty());
        prop_assert!(res.is_rejected());
        let character = &state.player(actor.id).unwrap().character;
        prop_assert_eq!(character.gold(), gold);
        prop_assert!(character.inventory().is_empty());
    }

    #[test]
    fn prop_turn_index_stays_valid(ops in prop::collection::vec(roster_op(), 0..40)) {
        let mut state = GameState::new();
        for op in ops {
            match op {
                RosterOp::Add(id) => {
                    state.add_player(Player::new(PlayerId(id), format!("P{id}"), 1));
                }
                RosterOp::Remove(id) => {
                    let before = state.current_player_id();
                    state.remove_player(PlayerId(id));
                    // Removing someone else never moves the turn.
                    if before.is_some() && before != Some(PlayerId(id)) {
                        prop_assert_eq!(state.current_player_id(), before);
                    }
                }
                RosterOp::Advance => {
                    state.advance_turn();
                }
            }
            check_state(&state)?;
        }
    }

    #[test]
    fn prop_rogue_attack_strikes_twice(stealth_bonus in 0u32..10, monster_hp in 200u32..400) {
        let engine = GameEngine::new();
        let mut state = GameState::new();
        let actor = Actor::new(PlayerId(1), "Ann");
        let mut player = Player::new(actor.id, "Ann", 5);
        player.character = Character::new(CharacterClass::Rogue, 5);
        player.character.increase_stealth(stealth_bonus);
        let stealth = player.character.stealth().unwrap();
        state.add_player(player);
        state.begin_encounter(
            dungeon_core::monster::Monster::new(monster_hp, 1, 1, 1, 1, "Dummy", Vec::new()),
            actor.id,
        );

        let res = engine.resolve(&mut state, &actor, Intent::Attack, &mut ScriptedDice::empty());
        let hits: Vec<u32> = res
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::MonsterDamaged { amount, .. } => Some(*amount),
                _ => None,
            })
            .collect();
        prop_assert_eq!(hits, vec![stealth, stealth]);
        prop_assert_eq!(state.encounter().unwrap().monster.hp(), monster_hp - 2 * stealth);
    }

    #[test]
    fn prop_random_games_keep_invariants(
        seed in any::<u64>(),
        classes in prop::collection::vec(class(), 1..4),
        script in prop::collection::vec((0usize..4, intent()), 0..60),
    ) {
        let engine = GameEngine::new();
        let mut dice = RandomDice::seeded(seed);
        let mut state = GameState::new();

        let actors: Vec<Actor> = (0..classes.len())
            .map(|i| Actor::new(PlayerId(i as i64), format!("P{i}")))
            .collect();
        for (actor, class) in actors.iter().zip(&classes) {
            engine.resolve(&mut state, actor, Intent::Join, &mut dice);
            engine.resolve(&mut state, actor, Intent::SelectClass(*class), &mut dice);
        }

        for (who, intent) in script {
            let actor = &actors[who % actors.len()];
            let before = state.player(actor.id).map(|p| p.character.gold());
            let res = engine.resolve(&mut state, actor, intent, &mut dice);

            if res.is_rejected() {
                prop_assert_eq!(state.player(actor.id).map(|p| p.character.gold()), before);
            }
            for effect in &res.effects {
                if let Effect::PlayerDefeated { player } = effect {
                    prop_assert!(!state.contains(*player));
                    prop_assert!(!state.turn_order().contains(player));
                }
            }
            check_state(&state)?;
        }
    }
}
