//! Hangman game server.
//!
//! Serves one authoritative game per WebSocket connection on `/ws`, with a
//! `/health` endpoint, structured logging and optional Prometheus metrics.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
