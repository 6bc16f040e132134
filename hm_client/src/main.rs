//! A terminal client for the hangman server.
//!
//! The client opens one WebSocket, which gives it one game, and renders
//! every snapshot the server pushes.

use anyhow::Result;
use hm_client::websocket_client::WebSocketClient;
use pico_args::Arguments;

const DEFAULT_SERVER: &str = "ws://127.0.0.1:4000/ws";

const HELP: &str = "\
Play hangman against a hangman server

USAGE:
  hm_client [OPTIONS]

OPTIONS:
  --server URL          WebSocket URL  [default: ws://127.0.0.1:4000/ws]

FLAGS:
  -h, --help            Print help information

IN GAME:
  <letter>              Guess a letter
  restart               Start a new game
  help                  Show in-game commands
  quit                  Leave
";

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let server_url: String = pargs
        .opt_value_from_str("--server")?
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    WebSocketClient::new(server_url).connect_and_play().await?;

    println!("\nDisconnected from server.");
    Ok(())
}
