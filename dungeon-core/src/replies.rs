//! Player-facing text that does not depend on a particular resolution.

use crate::state::Player;

pub const HELP: &str = "\
Welcome to the dungeon! Available commands:

/startgame - Start a new game in this chat.
/join - Join the current game as a player.
/class <mage|rogue|warrior> - Choose your class.
/explore - Venture deeper into the dungeon.
/rest - Recover your strength.
/shop - Show the shop.
/buy <id> - Buy an item.
/inventory - Show your inventory.
/use <id> - Use an item from your inventory.
/attack, /spell, /cast <name>, /block - Fight the monster in front of you.
/state - Show every player's status.
/turn - Pass the turn to the next player.
/narrate - Ask the storyteller to describe the scene.
/endgame - End the current game.";

pub const GAME_STARTED: &str = "The game has begun! Add players using the /join command.";
pub const GAME_ENDED: &str = "The game has ended.";

pub const DUNGEON_INTRO: &str = "The dungeon looms before you, dark and foreboding. \
The air is thick with the scent of danger. You feel a shiver down your spine as you prepare to enter.";

pub const STORYTELLER_FALLBACK: &str =
    "Something went wrong and the storyteller lost the thread of the story.";

pub fn player_description(player: &Player) -> String {
    format!(
        "You see {}, a brave adventurer with an initiative score of {}. \
They are ready to embark on a grand adventure.",
        player.name, player.initiative
    )
}

pub fn player_joined(player: &Player) -> String {
    format!(
        "Player {} has joined the game with an initiative of {}.",
        player.name, player.initiative
    )
}

pub fn player_turn(name: &str) -> String {
    format!("It's {name}'s turn.")
}

pub fn player_defeated(name: &str) -> String {
    format!("{name} has been defeated and is out of the game.")
}

pub fn action_prompt(name: &str) -> String {
    format!("What would you like to do, {name}?")
}
