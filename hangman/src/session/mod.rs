//! Game sessions using the async actor model.
//!
//! This module implements:
//! - SessionActor: Async actor owning exactly one [`HangmanGame`](crate::HangmanGame)
//! - SessionManager: Registry spawning, looking up and closing session actors
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! Each session runs in its own Tokio task with an mpsc inbox and processes
//! one request at a time, so the game needs no locks. Subscribers read the
//! latest snapshot from a watch channel, so a slow reader may skip
//! intermediate snapshots but always ends up on the current one.
//!
//! ## Example
//!
//! ```
//! use hangman::{GuessOutcome, SessionConfig, SessionManager};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let manager = SessionManager::new(SessionConfig::default(), 16).unwrap();
//! let session = manager.create_session().await.unwrap();
//!
//! let response = session.guess("k").await.unwrap();
//! assert_eq!(response.outcome(), Some(GuessOutcome::Accepted));
//!
//! manager.close_session(session.id()).await.unwrap();
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;

pub use actor::{SessionActor, SessionHandle};
pub use config::SessionConfig;
pub use errors::SessionError;
pub use manager::SessionManager;
pub use messages::{SessionMessage, SessionResponse};

/// Unique identifier of a session.
pub type SessionId = uuid::Uuid;
