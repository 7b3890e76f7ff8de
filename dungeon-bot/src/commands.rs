//! Slash command parsing and menu rendering.

use dungeon_core::{CharacterClass, Command, Intent};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Commands start with '/'. Type /help to see them.")]
    NotACommand,

    #[error("Unknown command /{0}. Type /help to see the commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Class(#[from] dungeon_core::character::UnknownClass),
}

/// Parse a chat message such as `/buy 2` or `/cast@dungeon_bot Frost Bolt`.
pub fn parse(text: &str) -> Result<Command, ParseError> {
    let text = text.trim();
    let body = text.strip_prefix('/').ok_or(ParseError::NotACommand)?;

    let (head, args) = match body.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (body, ""),
    };
    // Group chats address commands as /name@bot.
    let name = head.split('@').next().unwrap_or(head).to_lowercase();

    let command = match name.as_str() {
        "start" | "help" => Command::Help,
        "startgame" => Command::StartGame,
        "endgame" => Command::EndGame,
        "narrate" => Command::Narrate,
        "join" => Intent::Join.into(),
        "class" => {
            if args.is_empty() {
                return Err(ParseError::Usage("/class <mage|rogue|warrior>"));
            }
            Intent::SelectClass(args.parse::<CharacterClass>()?).into()
        }
        "explore" => Intent::Explore.into(),
        "rest" => Intent::Rest.into(),
        "shop" => Intent::Shop.into(),
        "buy" => Intent::Buy(item_id(args, "/buy <item id>")?).into(),
        "inventory" => Intent::Inventory.into(),
        "use" => Intent::UseItem(item_id(args, "/use <item id>")?).into(),
        "attack" => Intent::Attack.into(),
        "spell" => Intent::CastSpell.into(),
        "cast" => {
            if args.is_empty() {
                return Err(ParseError::Usage("/cast <spell name>"));
            }
            Intent::CastNamedSpell(args.to_string()).into()
        }
        "block" => Intent::Block.into(),
        "turn" => Intent::AdvanceTurn.into(),
        "state" => Intent::State.into(),
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn item_id(args: &str, usage: &'static str) -> Result<u32, ParseError> {
    args.parse().map_err(|_| ParseError::Usage(usage))
}

/// The slash command that issues `intent`.
pub fn render(intent: &Intent) -> String {
    match intent {
        Intent::Join => "/join".to_string(),
        Intent::SelectClass(class) => format!("/class {}", class.name().to_lowercase()),
        Intent::Explore => "/explore".to_string(),
        Intent::Rest => "/rest".to_string(),
        Intent::Shop => "/shop".to_string(),
        Intent::Buy(id) => format!("/buy {id}"),
        Intent::Inventory => "/inventory".to_string(),
        Intent::UseItem(id) => format!("/use {id}"),
        Intent::Attack => "/attack".to_string(),
        Intent::CastSpell => "/spell".to_string(),
        Intent::Block => "/block".to_string(),
        Intent::CastNamedSpell(name) => format!("/cast {name}"),
        Intent::AdvanceTurn => "/turn".to_string(),
        Intent::State => "/state".to_string(),
    }
}

/// One menu line listing the follow-up commands.
pub fn menu(choices: &[Intent]) -> Option<String> {
    if choices.is_empty() {
        return None;
    }
    let commands: Vec<String> = choices.iter().map(render).collect();
    Some(commands.join(" | "))
}
