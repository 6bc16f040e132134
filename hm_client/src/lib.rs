//! Internal modules for the hangman terminal client.
//!
//! This library provides input parsing, the text renderer, and the WebSocket
//! loop used by the hm_client binary.

pub mod commands;
pub mod renderer;
pub mod websocket_client;
