//! Prometheus metrics for monitoring the hangman server.
//!
//! Metrics are exposed in Prometheus text format on a separate listener,
//! installed only when `METRICS_BIND` is configured. Without an exporter the
//! recording functions are no-ops.
//!
//! # Metrics Categories
//!
//! - **WebSocket Metrics**: Connections, messages sent/received
//! - **Game Metrics**: Active sessions, guesses by outcome, finished games
//! - **Rate Limiting Metrics**: Dropped frames
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use hm_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::websocket_connections_total();
//! metrics::active_sessions(1);
//! ```

use hangman::{GuessOutcome, LifecycleState};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// WebSocket Metrics
// ============================================================================

/// Increment total WebSocket connections counter.
pub fn websocket_connections_total() {
    metrics::counter!("websocket_connections_total").increment(1);
}

/// Increment WebSocket messages sent counter.
pub fn websocket_messages_sent() {
    metrics::counter!("websocket_messages_sent").increment(1);
}

/// Increment WebSocket messages received counter.
pub fn websocket_messages_received() {
    metrics::counter!("websocket_messages_received").increment(1);
}

// ============================================================================
// Game Metrics
// ============================================================================

/// Set current active sessions count.
pub fn active_sessions(count: usize) {
    metrics::gauge!("active_sessions").set(count as f64);
}

/// Increment guesses counter, labelled by outcome.
pub fn guesses_total(outcome: GuessOutcome) {
    metrics::counter!("guesses_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Increment finished games counter for a terminal state.
pub fn games_finished_total(state: LifecycleState) {
    if state.is_terminal() {
        metrics::counter!("games_finished_total",
            "result" => state.to_string()
        )
        .increment(1);
    }
}

/// Increment restarts counter.
pub fn restarts_total() {
    metrics::counter!("restarts_total").increment(1);
}

// ============================================================================
// Rate Limiting Metrics
// ============================================================================

/// Increment rate limit hits counter.
pub fn rate_limit_hits_total(endpoint: &str) {
    metrics::counter!("rate_limit_hits_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}
