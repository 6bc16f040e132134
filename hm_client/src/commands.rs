//! Line based input parsing for the terminal client.

use std::fmt;

/// Usage text printed for `help`.
pub const USAGE: &str = "\
Type a letter and press Enter to guess it.
  restart   Start a new game (Enter alone also restarts once a game is over)
  help      Show this message
  quit      Leave the game";

/// What the user asked for with one line of input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputCommand {
    /// Raw text for the main action control. The server decides whether it
    /// is a valid guess.
    Action(String),
    Restart,
    Help,
    Quit,
}

impl fmt::Display for InputCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(input) => write!(f, "action({input:?})"),
            Self::Restart => f.write_str("restart"),
            Self::Help => f.write_str("help"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

/// Parse one line typed by the user.
///
/// Single letters are never treated as shortcuts, so every letter stays a
/// possible guess.
///
/// # Examples
///
/// ```
/// use hm_client::commands::{InputCommand, parse_command};
///
/// assert_eq!(parse_command("k"), InputCommand::Action("k".to_string()));
/// assert_eq!(parse_command("/restart"), InputCommand::Restart);
/// assert_eq!(parse_command("exit"), InputCommand::Quit);
/// ```
pub fn parse_command(input: &str) -> InputCommand {
    let trimmed = input.trim();

    match trimmed.to_lowercase().as_str() {
        "restart" | "/restart" => InputCommand::Restart,
        "help" | "/help" | "?" => InputCommand::Help,
        "quit" | "exit" | "/quit" => InputCommand::Quit,
        _ => InputCommand::Action(trimmed.to_string()),
    }
}
