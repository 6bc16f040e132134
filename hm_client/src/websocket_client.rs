//! WebSocket client for one live hangman game.

use anyhow::{Context, Result};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use hangman::{ClientCommand, ClientProjector, ServerEvent, utils};
use std::sync::Arc;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::Mutex,
};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
};

use crate::{
    commands::{InputCommand, USAGE, parse_command},
    renderer::TerminalRenderer,
};

/// Projector shared between the socket reader and the input loop.
pub type SharedProjector = Arc<Mutex<ClientProjector<TerminalRenderer>>>;

/// WebSocket game client
pub struct WebSocketClient {
    ws_url: String,
}

impl WebSocketClient {
    pub fn new(ws_url: String) -> Self {
        Self { ws_url }
    }

    /// Connect to the server and play until the user quits or the server
    /// goes away.
    pub async fn connect_and_play(self) -> Result<()> {
        println!("Connecting to {}...", self.ws_url);

        let (ws_stream, _) = connect_async(&self.ws_url)
            .await
            .context("Failed to connect to WebSocket")?;

        println!("Connected! Waiting for the first board...\n");

        let (mut write, read) = ws_stream.split();
        let projector: SharedProjector =
            Arc::new(Mutex::new(ClientProjector::new(TerminalRenderer::new())));

        let mut read_handle = tokio::spawn(read_events(read, projector.clone(), |screen| {
            // Clear screen and move cursor to top
            print!("\x1B[2J\x1B[1;1H{screen}");
        }));

        let mut stdin = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = stdin.next_line() => {
                    let line = match line {
                        Ok(Some(line)) => line,
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("Error reading input: {}", e);
                            break;
                        }
                    };

                    let request = match parse_command(&line) {
                        InputCommand::Quit => {
                            println!("Disconnecting...");
                            break;
                        }
                        InputCommand::Help => {
                            println!("{USAGE}");
                            continue;
                        }
                        InputCommand::Restart => ClientCommand::Restart,
                        InputCommand::Action(input) => {
                            let projector = projector.lock().await;
                            if input.is_empty() && !projector.is_game_over() {
                                continue;
                            }
                            projector.action_intent(&input)
                        }
                    };

                    if let Err(e) = send_command(&mut write, &request).await {
                        eprintln!("Error: {:#}", e);
                        break;
                    }
                }
                _ = &mut read_handle => {
                    println!("Server closed connection");
                    break;
                }
            }
        }

        let _ = write.close().await;
        read_handle.abort();

        Ok(())
    }
}

/// Encode a request and send it as a text frame.
pub async fn send_command<W>(write: &mut W, command: &ClientCommand) -> Result<()>
where
    W: Sink<Message> + Unpin,
    W::Error: std::error::Error + Send + Sync + 'static,
{
    let text = utils::encode(command)?;
    write
        .send(Message::Text(text.into()))
        .await
        .context("Failed to send command")?;
    Ok(())
}

/// Feed every server frame into the projector until the socket closes.
///
/// `draw` receives the redrawn screen after each snapshot or warning.
/// Notifications are printed as they are, and unknown frames are reported
/// without touching the screen.
pub async fn read_events<S, F>(mut read: S, projector: SharedProjector, draw: F)
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    F: Fn(&str),
{
    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => match utils::decode::<ServerEvent>(text.as_str()) {
                Ok(ServerEvent::Notification(notice)) => println!("* {notice}"),
                Ok(event) => {
                    let mut projector = projector.lock().await;
                    projector.handle_event(&event);
                    let renderer = projector.renderer_mut();
                    renderer.take_input_clear();
                    draw(&renderer.draw());
                }
                Err(e) => eprintln!("Failed to parse server event: {}", e),
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                eprintln!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }
}
