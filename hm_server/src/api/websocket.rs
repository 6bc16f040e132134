//! WebSocket handler for live hangman games.
//!
//! Every connection owns exactly one game session. The server is the only
//! party that evaluates guesses; the client renders whatever it is sent.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws`
//! 2. Server creates a session and subscribes the connection to it
//! 3. The current snapshot is pushed immediately (`state` in `Start`)
//! 4. A send task forwards the latest snapshot and every direct reply to the
//!    socket while the receive loop turns client frames into session requests
//! 5. On disconnect the session is closed; a new connection starts a new game
//!
//! # Client Messages
//!
//! ```json
//! { "letter": "k" }
//! { "restart": true }
//! ```
//!
//! # Server Messages
//!
//! ```json
//! { "name": "state", "content": { "guessedCharacter": ["k", "_"], "...": "..." } }
//! { "name": "invalid_character" }
//! { "name": "notification", "content": "Invalid message format" }
//! ```

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use hangman::{
    ClientCommand, GuessError, GuessOutcome, ServerEvent, SessionError, SessionHandle,
    utils::{self, MAX_MESSAGE_SIZE},
};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{
    AppState,
    rate_limiter::{FrameLimiter, rate_limited_message},
    request_id::RequestId,
};
use crate::{
    logging::{log_guess, log_session_event},
    metrics,
};

/// Notification text for frames that are not a valid request
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid message format";

/// Upgrade HTTP connection to WebSocket for one game session.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    request_id: RequestId,
    State(state): State<AppState>,
) -> Response {
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_socket(socket, request_id, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, request_id: RequestId, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    metrics::websocket_connections_total();

    let session = match state.session_manager.create_session().await {
        Ok(session) => session,
        Err(e) => {
            warn!("Rejecting WebSocket {}: {}", request_id, e);
            if let Ok(text) = utils::encode(&ServerEvent::Notification(e.to_string())) {
                let _ = sender.send(Message::Text(text.into())).await;
            }
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };
    let session_id = session.id();

    info!("WebSocket connected: request={}, session={}", request_id, session_id);
    log_session_event(session_id, "connected");
    metrics::active_sessions(state.session_manager.session_count().await);

    // Replies meant only for this client; snapshots come from the session
    let (event_tx, mut event_rx) =
        mpsc::channel::<ServerEvent>(state.session_manager.config().subscriber_capacity);

    let mut snapshots = match session.subscribe().await {
        Ok(snapshots) => snapshots,
        Err(e) => {
            error!("Failed to subscribe to session {}: {}", session_id, e);
            close_session(&state, session_id).await;
            return;
        }
    };

    let send_task = tokio::spawn(async move {
        loop {
            // Snapshots first: a reply is only queued after the snapshot it
            // follows has been published
            let event = tokio::select! {
                biased;
                changed = snapshots.changed() => match changed {
                    Ok(()) => {
                        let view = snapshots.borrow_and_update().clone();
                        ServerEvent::State(view)
                    }
                    Err(_) => break,
                },
                reply = event_rx.recv() => match reply {
                    Some(event) => event,
                    None => break,
                },
            };

            let text = match utils::encode(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode {}: {}", event, e);
                    continue;
                }
            };

            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
            metrics::websocket_messages_sent();
        }
    });

    let mut limiter = FrameLimiter::default();

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                metrics::websocket_messages_received();

                if let Err(retry_after) = limiter.check() {
                    warn!("Rate limit exceeded for session {}, dropping frame", session_id);
                    metrics::rate_limit_hits_total("ws");
                    let notice = ServerEvent::Notification(rate_limited_message(retry_after));
                    if event_tx.send(notice).await.is_err() {
                        break;
                    }
                    continue;
                }

                debug!("Received frame from session {}: {}", session_id, text.as_str());

                let reply = match utils::decode::<ClientCommand>(text.as_str()) {
                    Ok(command) => match handle_command(command, &session).await {
                        Ok(reply) => reply,
                        Err(e) => {
                            error!("Session {} stopped unexpectedly: {}", session_id, e);
                            break;
                        }
                    },
                    Err(e) => {
                        warn!("Failed to parse frame from session {}: {}", session_id, e);
                        Some(ServerEvent::Notification(INVALID_FORMAT_MESSAGE.to_string()))
                    }
                };

                if let Some(event) = reply
                    && event_tx.send(event).await.is_err()
                {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("WebSocket closed by client: session={}", session_id);
                break;
            }
            Err(e) => {
                warn!("WebSocket error on session {}: {}", session_id, e);
                break;
            }
            // Ping/pong is answered by axum, binary frames are not part of the protocol
            _ => {}
        }
    }

    send_task.abort();
    close_session(&state, session_id).await;

    info!("WebSocket disconnected: session={}", session_id);
    log_session_event(session_id, "disconnected");
}

/// Forward one request to the session.
///
/// Snapshots reach the client through the session's watch channel, so only
/// replies aimed at this client alone are returned here.
pub async fn handle_command(
    command: ClientCommand,
    session: &SessionHandle,
) -> Result<Option<ServerEvent>, SessionError> {
    match command {
        ClientCommand::Guess(letter) => {
            let response = session.guess(letter.as_str()).await?;
            let Some(outcome) = response.outcome() else {
                return Ok(None);
            };

            log_guess(session.id(), &letter, outcome);
            metrics::guesses_total(outcome);

            let reply = match outcome {
                GuessOutcome::Invalid => Some(ServerEvent::InvalidCharacter),
                GuessOutcome::Inapplicable => Some(ServerEvent::Notification(
                    GuessError::Inapplicable.to_string(),
                )),
                GuessOutcome::Accepted | GuessOutcome::Rejected => {
                    let game_state = response.view().game_state;
                    if game_state.is_terminal() {
                        metrics::games_finished_total(game_state);
                        log_session_event(session.id(), &format!("game {game_state}"));
                    }
                    None
                }
                GuessOutcome::AlreadyGuessed => None,
            };
            Ok(reply)
        }
        ClientCommand::Restart => {
            session.restart().await?;
            metrics::restarts_total();
            log_session_event(session.id(), "restarted");
            Ok(None)
        }
    }
}

async fn close_session(state: &AppState, session_id: Uuid) {
    if let Err(e) = state.session_manager.close_session(session_id).await {
        warn!("Failed to close session {}: {}", session_id, e);
    }
    metrics::active_sessions(state.session_manager.session_count().await);
}
