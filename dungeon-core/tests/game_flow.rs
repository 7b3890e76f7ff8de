//! End-to-end games driven through `GameService` with scripted dice.

use dungeon_core::engine::{Effect, Intent, Rejection};
use dungeon_core::replies;
use dungeon_core::service::Command;
use dungeon_core::testing::{
    assert_accepted, assert_hp, assert_in_combat, assert_not_in_combat, assert_rejected,
    assert_says, MockNarrator, TestTable,
};
use dungeon_core::{CharacterClass, PlayerId};

// =============================================================================
// Lobby
// =============================================================================

#[tokio::test]
async fn test_commands_need_a_started_game() {
    let table = TestTable::new();

    assert_rejected(&table.act(1, Intent::Join).await, Rejection::NotStarted);
    assert_rejected(&table.command(1, Command::EndGame).await, Rejection::NotStarted);
    assert_rejected(&table.command(1, Command::Narrate).await, Rejection::NotStarted);

    // Help works anywhere.
    let help = table.command(1, Command::Help).await;
    assert_accepted(&help);
    assert_says(&help, "/startgame");
}

#[tokio::test]
async fn test_start_twice_and_end() {
    let table = TestTable::new();

    assert_says(&table.start().await, replies::GAME_STARTED);
    assert_rejected(&table.start().await, Rejection::AlreadyStarted);

    assert_says(&table.command(1, Command::EndGame).await, replies::GAME_ENDED);
    assert!(!table.service.is_running(table.session).await);

    // A fresh game can follow.
    assert_accepted(&table.start().await);
}

#[tokio::test]
async fn test_join_and_choose_class() {
    let table = TestTable::new();
    table.start().await;

    let joined = table.join(1, 15).await;
    assert_accepted(&joined);
    assert_says(&joined, "dungeon looms");
    assert_says(&joined, "initiative of 15");
    assert_eq!(joined.choices.len(), 3);

    let second = table.join(2, 4).await;
    assert!(!second.lines.iter().any(|l| l.contains("dungeon looms")));

    let chosen = table.act(1, Intent::SelectClass(CharacterClass::Mage)).await;
    assert_says(&chosen, "Player P1: Mage: HP: 100/100, Mana: 100/100, Gold: 0, initiative: 15");
    assert_says(&chosen, "What would you like to do, P1?");

    let state = table.state().await;
    assert_eq!(state.turn_order(), &[PlayerId(1), PlayerId(2)]);
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let table = TestTable::new();
    table.seat(&[(1, CharacterClass::Rogue)]).await;

    let other = dungeon_core::SessionId(555);
    let service = &table.service;
    let actor = TestTable::actor(1);
    service.handle(other, &actor, Command::StartGame).await;

    let state = service.snapshot(other).await.unwrap();
    assert!(state.is_empty());
    assert_eq!(table.state().await.player_count(), 1);
    assert_eq!(service.session_count().await, 2);
}

// =============================================================================
// Exploration
// =============================================================================

#[tokio::test]
async fn test_treasure_then_shop() {
    let table = TestTable::new();
    table.seat(&[(1, CharacterClass::Warrior)]).await;

    table.roll([18, 120]);
    let found = table.act(1, Intent::Explore).await;
    assert_says(&found, "You rolled a 18.");
    assert_says(&found, "120 gold");
    assert_eq!(table.gold(1).await, Some(120));

    let bought = table.act(1, Intent::Buy(3)).await;
    assert_accepted(&bought);
    assert_eq!(table.gold(1).await, Some(40));

    // 40 gold cannot cover another 80-gold armor.
    let refused = table.act(1, Intent::Buy(3)).await;
    assert_says(&refused, "40 gold short");
    let state = table.state().await;
    let warrior = &state.player(PlayerId(1)).unwrap().character;
    assert_eq!(warrior.gold(), 40);
    assert_eq!(warrior.inventory().len(), 1);

    let used = table.act(1, Intent::UseItem(3)).await;
    assert_accepted(&used);
    let state = table.state().await;
    assert_eq!(state.player(PlayerId(1)).unwrap().character.armor(), 7);
}

#[tokio::test]
async fn test_turns_rotate_and_gate_actions() {
    let table = TestTable::new();
    table
        .seat(&[(1, CharacterClass::Mage), (2, CharacterClass::Rogue)])
        .await;

    assert_rejected(&table.act(2, Intent::Explore).await, Rejection::NotYourTurn);
    // Looking around is always allowed.
    assert_accepted(&table.act(2, Intent::Shop).await);
    assert_accepted(&table.act(2, Intent::State).await);

    let next = table.act(1, Intent::AdvanceTurn).await;
    assert_says(&next, "It's P2's turn.");

    table.roll([20, 50]);
    assert_accepted(&table.act(2, Intent::Explore).await);
    assert_rejected(&table.act(1, Intent::Explore).await, Rejection::NotYourTurn);

    let back = table.act(2, Intent::AdvanceTurn).await;
    assert_says(&back, "It's P1's turn.");
}

// =============================================================================
// Combat
// =============================================================================

#[tokio::test]
async fn test_goblin_fight_to_victory() {
    let table = TestTable::new();
    table.seat(&[(1, CharacterClass::Warrior)]).await;

    // Roll 3 on the d20, then draw the goblin.
    table.roll([3, 0]);
    let met = table.act(1, Intent::Explore).await;
    assert_says(&met, "You encounter a monster! Monster: Goblin");
    assert_eq!(met.choices, vec![Intent::Attack, Intent::Block]);
    assert_in_combat(&table.state().await);

    // Combat blocks everything but fighting.
    assert_rejected(&table.act(1, Intent::Rest).await, Rejection::InCombat);
    assert_rejected(&table.act(1, Intent::AdvanceTurn).await, Rejection::InCombat);
    assert_rejected(&table.act(1, Intent::CastSpell).await, Rejection::CannotCastSpells);

    // 50 hp goblin against a 20 strength warrior: two hits, then a third.
    let first = table.act(1, Intent::Attack).await;
    assert_says(&first, "30/50 HP left");
    assert_hp(&table.state().await, PlayerId(1), 170);

    let blocked = table.act(1, Intent::Block).await;
    assert_says(&blocked, "blocks");
    assert_hp(&table.state().await, PlayerId(1), 165);

    table.act(1, Intent::Attack).await;
    let won = table.act(1, Intent::Attack).await;
    assert_says(&won, "The Goblin is defeated!");
    assert!(won.effects.iter().any(|e| matches!(e, Effect::MonsterDefeated { .. })));

    let state = table.state().await;
    assert_not_in_combat(&state);
    assert_eq!(state.player(PlayerId(1)).unwrap().character.strength(), 21);
    assert_rejected(&table.act(1, Intent::Attack).await, Rejection::NoMonster);
}

#[tokio::test]
async fn test_rogue_victory_grows_stealth() {
    let table = TestTable::new();
    table.seat(&[(1, CharacterClass::Rogue)]).await;

    table.roll([1, 0]);
    table.act(1, Intent::Explore).await;

    // 2 x 18 = 36 per attack; the goblin survives one round.
    let round = table.act(1, Intent::Attack).await;
    assert_says(&round, "14/50 HP left");
    assert_hp(&table.state().await, PlayerId(1), 110);

    table.act(1, Intent::Attack).await;
    let state = table.state().await;
    let rogue = &state.player(PlayerId(1)).unwrap().character;
    assert_eq!(rogue.stealth(), Some(19));
    assert_eq!(rogue.strength(), 6);
}

#[tokio::test]
async fn test_mage_spell_flow() {
    let table = TestTable::new();
    table.seat(&[(1, CharacterClass::Mage)]).await;

    table.roll([10, 1]);
    table.act(1, Intent::Explore).await;

    let menu = table.act(1, Intent::CastSpell).await;
    assert_says(&menu, "Lightning Strike (30 damage, 25 mana)");
    assert_hp(&table.state().await, PlayerId(1), 100);

    // 100 on the reward roll: no intelligence this time.
    table.roll([100]);
    let cast = table
        .act(1, Intent::CastNamedSpell("Lightning Strike".into()))
        .await;
    assert_says(&cast, "50/80 HP left");
    let state = table.state().await;
    let mage = &state.player(PlayerId(1)).unwrap().character;
    assert_eq!(mage.mana(), Some((75, 100)));
    assert_eq!(mage.intelligence(), 15);
    assert_eq!(mage.hp(), 85);
}

#[tokio::test]
async fn test_defeated_player_leaves_and_turn_passes() {
    let table = TestTable::new();
    table
        .seat(&[
            (1, CharacterClass::Mage),
            (2, CharacterClass::Mage),
            (3, CharacterClass::Rogue),
        ])
        .await;
    table.act(1, Intent::AdvanceTurn).await;

    // P2 meets an orc and trades blows until falling.
    table.roll([2, 1]);
    table.act(2, Intent::Explore).await;
    let mut last = table.act(2, Intent::Attack).await;
    for _ in 0..10 {
        if last.effects.contains(&Effect::PlayerDefeated { player: PlayerId(2) }) {
            break;
        }
        last = table.act(2, Intent::Attack).await;
    }
    assert_says(&last, &replies::player_defeated("P2"));

    let state = table.state().await;
    assert!(!state.contains(PlayerId(2)));
    assert_eq!(state.turn_order(), &[PlayerId(1), PlayerId(3)]);
    assert_not_in_combat(&state);
    assert_eq!(state.current_player_id(), Some(PlayerId(3)));

    assert_rejected(&table.act(2, Intent::Explore).await, Rejection::NotAPlayer);
    assert_says(&table.act(3, Intent::AdvanceTurn).await, "It's P1's turn.");
}

// =============================================================================
// Narration
// =============================================================================

#[tokio::test]
async fn test_narration_failure_falls_back() {
    let table = TestTable::with_narrator(MockNarrator::failing());
    table.seat(&[(1, CharacterClass::Warrior)]).await;

    let res = table.command(1, Command::Narrate).await;
    assert_eq!(res.lines, vec![replies::STORYTELLER_FALLBACK.to_string()]);
    assert_eq!(table.narrator.scenes().len(), 1);
}

#[tokio::test]
async fn test_narration_without_players() {
    let table = TestTable::new();
    table.start().await;
    assert_rejected(&table.command(1, Command::Narrate).await, Rejection::NoPlayers);
}

#[tokio::test]
async fn test_legal_actions_follow_the_fight() {
    let table = TestTable::new();
    table.seat(&[(1, CharacterClass::Mage)]).await;
    let service = &table.service;

    let idle = service.legal_actions(table.session, PlayerId(1)).await.unwrap();
    assert!(idle.contains(&Intent::Explore));

    table.roll([5, 0]);
    table.act(1, Intent::Explore).await;
    let fighting = service.legal_actions(table.session, PlayerId(1)).await.unwrap();
    assert_eq!(fighting, vec![Intent::Attack, Intent::CastSpell]);
}
