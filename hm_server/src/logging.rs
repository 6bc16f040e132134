//! Structured logging configuration.
//!
//! Library code logs through the `log` facade; those records are bridged into
//! the tracing subscriber installed here.

use hangman::{GuessOutcome, SessionId};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,hyper=warn,tower_http=warn";

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use hm_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Console layer
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log one classified guess
///
/// # Example
///
/// ```
/// use hangman::GuessOutcome;
/// use hm_server::logging::log_guess;
///
/// log_guess(uuid::Uuid::new_v4(), "k", GuessOutcome::Accepted);
/// ```
pub fn log_guess(session_id: SessionId, letter: &str, outcome: GuessOutcome) {
    match outcome {
        GuessOutcome::Invalid | GuessOutcome::Inapplicable => tracing::debug!(
            session_id = %session_id,
            letter = letter,
            outcome = %outcome,
            "Guess ignored"
        ),
        _ => tracing::debug!(
            session_id = %session_id,
            letter = letter,
            outcome = %outcome,
            "Guess applied"
        ),
    }
}

/// Log a session lifecycle event (connect, disconnect, restart, game over)
pub fn log_session_event(session_id: SessionId, event: &str) {
    tracing::info!(session_id = %session_id, event = event, "Session event");
}
