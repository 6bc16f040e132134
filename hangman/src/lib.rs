//! # Hangman
//!
//! A hangman game engine where the server owns the game and clients only render it.
//!
//! The engine keeps the secret name, the per-character reveal mask, the incorrect
//! guesses and the remaining chances, and moves between four lifecycle states:
//!
//! - **Start**: fresh game, nothing guessed yet
//! - **Going**: at least one guess has changed the game
//! - **Won**: every character of the secret name is revealed
//! - **Lost**: no chances left
//!
//! ## Core Modules
//!
//! - [`game`]: Entities and the authoritative game state machine
//! - [`net`]: Wire protocol shared by server and client (envelopes, requests, codec)
//! - [`session`]: One actor task per connection owning one game
//! - [`projector`]: Client-side mapping of snapshots onto a renderer
//!
//! ## Example
//!
//! ```
//! use hangman::{GuessOutcome, HangmanGame, LifecycleState, SecretName};
//!
//! let secret: SecretName = "kanna kamui".parse().unwrap();
//! let mut game = HangmanGame::new(secret);
//!
//! let (view, outcome) = game.submit_guess("k");
//! assert_eq!(outcome, GuessOutcome::Accepted);
//! assert_eq!(view.game_state, LifecycleState::Going);
//! assert_eq!(view.revealed_word(), "k____ k____");
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameError, GuessError, HangmanGame,
    constants::{self, DEFAULT_CHANCES, DEFAULT_SECRET_NAME},
    entities::{self, GameView, GuessOutcome, Letter, LifecycleState, SecretName},
};

/// Wire protocol for engine/projector synchronization.
pub mod net;
pub use net::{
    errors::ProtocolError,
    messages::{self, ClientCommand, ServerEvent},
    utils,
};

/// Client-side projection of game snapshots onto a renderer.
pub mod projector;
pub use projector::{ClientProjector, RenderEffects, Renderer, render, render_event};

/// Session actors and their registry.
pub mod session;
pub use session::{SessionConfig, SessionError, SessionHandle, SessionId, SessionManager};
