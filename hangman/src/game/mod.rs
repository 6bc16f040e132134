//! Hangman game engine - entities and the authoritative state machine.
//!
//! This module provides:
//! - Validated value types for letters and secret names
//! - The reveal mask and incorrect-guess history
//! - The lifecycle state machine (`Start`, `Going`, `Won`, `Lost`)
//! - Serializable snapshots ([`GameView`]) pushed to clients

pub mod constants;
pub mod entities;
mod state_machine;

pub use entities::GameView;
pub use state_machine::{GameError, GuessError, HangmanGame};
