use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ProtocolError;
use crate::game::entities::GameView;

/// A message from the server to a connected renderer.
///
/// Encoded as a `{ "name": ..., "content": ... }` envelope. Unknown names
/// fail to decode instead of being silently dropped.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "name", content = "content", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full game snapshot. Replaces whatever the renderer showed before.
    #[serde(alias = "game")]
    State(GameView),
    /// The last guess was not a single letter. Game fields are untouched.
    InvalidCharacter,
    /// Free-form server notice.
    Notification(String),
}

impl ServerEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::State(_) => "state",
            Self::InvalidCharacter => "invalid_character",
            Self::Notification(_) => "notification",
        }
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(view) => write!(f, "state ({})", view.game_state),
            Self::InvalidCharacter => f.write_str("invalid character"),
            Self::Notification(msg) => write!(f, "notification: {msg}"),
        }
    }
}

/// A request from a renderer to the server.
///
/// Guesses carry the raw user input; the server alone decides whether it is
/// a valid letter.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "WireRequest", into = "WireRequest")]
pub enum ClientCommand {
    /// `{ "letter": "<input>" }`
    Guess(String),
    /// `{ "restart": true }`
    Restart,
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guess(letter) => write!(f, "guess {letter:?}"),
            Self::Restart => f.write_str("restart"),
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct WireRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    letter: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    restart: bool,
}

impl TryFrom<WireRequest> for ClientCommand {
    type Error = ProtocolError;

    fn try_from(value: WireRequest) -> Result<Self, Self::Error> {
        match (value.letter, value.restart) {
            (Some(letter), false) => Ok(Self::Guess(letter)),
            (None, true) => Ok(Self::Restart),
            (Some(_), true) => Err(ProtocolError::InvalidRequest(
                "request cannot both guess and restart".to_string(),
            )),
            (None, false) => Err(ProtocolError::InvalidRequest(
                "expected a letter or restart: true".to_string(),
            )),
        }
    }
}

impl From<ClientCommand> for WireRequest {
    fn from(value: ClientCommand) -> Self {
        match value {
            ClientCommand::Guess(letter) => Self {
                letter: Some(letter),
                restart: false,
            },
            ClientCommand::Restart => Self {
                letter: None,
                restart: true,
            },
        }
    }
}
