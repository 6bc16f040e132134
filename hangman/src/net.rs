//! Wire protocol between the authoritative server and its renderers.
//!
//! Frames are JSON text over a WebSocket. Every server frame is a
//! `{ "name", "content" }` envelope; client frames are bare request objects.

/// Protocol error types.
pub mod errors;

/// Server events and client commands.
pub mod messages;

/// JSON encode/decode helpers with frame size limits.
pub mod utils;
