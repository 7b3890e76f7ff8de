//! Line-oriented chat simulator.
//!
//! Each input line is one chat message: `<chat_id> <user_id> <name> <text>`.
//! Replies are printed as `[chat_id] <line>`, followed by an `options:` line
//! listing the commands the sender can use next. `#quit` exits.

use crate::commands;
use dungeon_core::{Actor, GameService, PlayerId, SessionId};
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Expected '<chat_id> <user_id> <name> <command>'")]
    Malformed,

    #[error("'{0}' is not a numeric id")]
    BadId(String),
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub chat: SessionId,
    pub sender: Actor,
    pub text: String,
}

impl Message {
    pub fn parse(line: &str) -> Result<Self, MessageError> {
        let mut parts = line.trim().splitn(4, char::is_whitespace);
        let (Some(chat), Some(user), Some(name), Some(text)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(MessageError::Malformed);
        };

        let id = |raw: &str| {
            raw.parse::<i64>()
                .map_err(|_| MessageError::BadId(raw.to_string()))
        };
        Ok(Self {
            chat: SessionId(id(chat)?),
            sender: Actor::new(PlayerId(id(user)?), name),
            text: text.trim().to_string(),
        })
    }
}

/// Turn one message into the lines to print.
pub async fn respond(service: &GameService, message: &Message) -> Vec<String> {
    let command = match commands::parse(&message.text) {
        Ok(command) => command,
        Err(e) => return vec![e.to_string()],
    };

    let resolution = service
        .handle(message.chat, &message.sender, command)
        .await;

    let mut lines = resolution.lines;
    if let Some(menu) = commands::menu(&resolution.choices) {
        lines.push(format!("options: {menu}"));
    }
    lines
}

/// Read messages from stdin until EOF or `#quit`.
pub async fn run(service: &GameService) -> io::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"=== Dungeon bot ===\nSend '<chat_id> <user_id> <name> /command'. #quit exits.\n\n")
        .await?;
    stdout.flush().await?;

    while let Some(line) = input.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "#quit" || line == "#exit" {
            stdout.write_all(b"Goodbye!\n").await?;
            break;
        }

        let message = match Message::parse(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "ignoring malformed line");
                stdout.write_all(format!("[ERROR] {e}\n").as_bytes()).await?;
                continue;
            }
        };
        debug!(chat = %message.chat, sender = %message.sender.id, text = %message.text, "message");

        let mut out = String::new();
        for reply in respond(service, &message).await {
            for part in reply.lines() {
                out.push_str(&format!("[{}] {part}\n", message.chat));
            }
        }
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::testing::{MockNarrator, ScriptedDice};
    use dungeon_core::ServiceConfig;

    fn message(line: &str) -> Message {
        Message::parse(line).unwrap()
    }

    #[test]
    fn test_parse_message() {
        let msg = message("-100 42 Ann /cast Frost Bolt");
        assert_eq!(msg.chat, SessionId(-100));
        assert_eq!(msg.sender, Actor::new(PlayerId(42), "Ann"));
        assert_eq!(msg.text, "/cast Frost Bolt");
    }

    #[test]
    fn test_parse_message_errors() {
        assert_eq!(Message::parse("1 2 Ann"), Err(MessageError::Malformed));
        assert_eq!(
            Message::parse("room 2 Ann /join"),
            Err(MessageError::BadId("room".into()))
        );
    }

    #[tokio::test]
    async fn test_respond_with_menu() {
        let service = GameService::with_parts(
            ServiceConfig::default(),
            Box::new(ScriptedDice::new([12])),
            Box::new(MockNarrator::default()),
        );

        let started = respond(&service, &message("7 1 Ann /startgame")).await;
        assert_eq!(started, vec![dungeon_core::replies::GAME_STARTED.to_string()]);

        let joined = respond(&service, &message("7 1 Ann /join")).await;
        assert_eq!(
            joined.last().map(String::as_str),
            Some("options: /class mage | /class rogue | /class warrior")
        );

        let bad = respond(&service, &message("7 1 Ann /fly")).await;
        assert_eq!(bad, vec!["Unknown command /fly. Type /help to see the commands.".to_string()]);
    }
}
