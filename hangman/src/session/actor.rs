//! Session actor implementation with async message handling.

use super::{
    SessionId,
    config::SessionConfig,
    errors::SessionError,
    messages::{SessionMessage, SessionResponse},
};
use crate::game::{
    HangmanGame,
    entities::{GameView, GuessOutcome, LifecycleState, SecretName},
};
use rand::seq::IndexedRandom;
use tokio::sync::{mpsc, oneshot, watch};

/// Session actor handle for sending messages
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    id: SessionId,
}

impl SessionHandle {
    pub fn new(sender: mpsc::Sender<SessionMessage>, id: SessionId) -> Self {
        Self { sender, id }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a message to the session
    pub async fn send(&self, message: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed(self.id))
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.send(make(tx)).await?;
        rx.await.map_err(|_| SessionError::Closed(self.id))
    }

    /// Submit raw guess input
    pub async fn guess(&self, letter: impl Into<String>) -> Result<SessionResponse, SessionError> {
        let letter = letter.into();
        self.request(|response| SessionMessage::Guess { letter, response })
            .await
    }

    pub async fn restart(&self) -> Result<SessionResponse, SessionError> {
        self.request(|response| SessionMessage::Restart { response })
            .await
    }

    pub async fn view(&self) -> Result<GameView, SessionError> {
        self.request(|response| SessionMessage::GetView { response })
            .await
    }

    /// Receiver of the session's snapshots.
    ///
    /// Only the newest snapshot is kept, so a slow reader skips intermediate
    /// ones but never misses the latest. The current snapshot is reported as
    /// changed right away. The receiver closes when the session stops.
    pub async fn subscribe(&self) -> Result<watch::Receiver<GameView>, SessionError> {
        self.request(|response| SessionMessage::Subscribe { response })
            .await
    }

    /// Stop the actor, waiting until it has processed everything queued before
    pub async fn close(&self) -> Result<(), SessionError> {
        self.request(|response| SessionMessage::Close { response })
            .await
    }
}

/// Session actor owning a single game
pub struct SessionActor {
    id: SessionId,

    config: SessionConfig,

    game: HangmanGame,

    inbox: mpsc::Receiver<SessionMessage>,

    /// Latest snapshot, read by every subscriber
    snapshots: watch::Sender<GameView>,

    games_played: u32,

    is_closed: bool,
}

impl SessionActor {
    /// Create a new session actor with a fresh game in `Start`
    pub fn new(id: SessionId, config: SessionConfig) -> Result<(Self, SessionHandle), SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;

        let secret = pick_secret(&config, None);
        let game = HangmanGame::with_chances(secret, config.max_chances)
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;

        let (sender, inbox) = mpsc::channel(config.inbox_capacity);
        let (snapshots, _) = watch::channel(game.view());

        let actor = Self {
            id,
            config,
            game,
            inbox,
            snapshots,
            games_played: 0,
            is_closed: false,
        };

        Ok((actor, SessionHandle::new(sender, id)))
    }

    /// Run the session actor event loop
    pub async fn run(mut self) {
        log::info!("Session {} started", self.id);

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!(
            "Session {} closed after {} finished game(s)",
            self.id,
            self.games_played
        );
    }

    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Guess { letter, response } => {
                let result = self.handle_guess(&letter);
                let _ = response.send(result);
            }

            SessionMessage::Restart { response } => {
                let result = self.handle_restart();
                let _ = response.send(result);
            }

            SessionMessage::GetView { response } => {
                let _ = response.send(self.game.view());
            }

            SessionMessage::Subscribe { response } => {
                let mut receiver = self.snapshots.subscribe();
                // New subscribers render immediately
                receiver.mark_changed();
                if response.send(receiver).is_ok() {
                    log::debug!(
                        "Session {}: {} subscriber(s)",
                        self.id,
                        self.subscriber_count()
                    );
                }
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    fn handle_guess(&mut self, letter: &str) -> SessionResponse {
        let before = self.game.state();
        let (view, outcome) = self.game.submit_guess(letter);

        if outcome.changes_view() {
            self.broadcast(&view);
        }

        if before != view.game_state && view.game_state.is_terminal() {
            self.games_played += 1;
            match view.game_state {
                LifecycleState::Won => log::info!("Session {}: game won", self.id),
                _ => log::info!("Session {}: game lost", self.id),
            }
        }

        if outcome == GuessOutcome::Invalid {
            log::debug!("Session {}: invalid guess {:?}", self.id, letter);
        }

        SessionResponse::Guessed { outcome, view }
    }

    fn handle_restart(&mut self) -> SessionResponse {
        if self.config.rotate_secrets {
            let secret = pick_secret(&self.config, Some(self.game.secret()));
            self.game.initialize(secret);
        } else {
            self.game.restart();
        }

        let view = self.game.view();
        self.broadcast(&view);
        log::debug!("Session {}: restarted", self.id);

        SessionResponse::Restarted { view }
    }

    /// Publish a snapshot, replacing any one a subscriber has not read yet
    fn broadcast(&self, view: &GameView) {
        self.snapshots.send_replace(view.clone());
    }

    pub fn subscriber_count(&self) -> usize {
        self.snapshots.receiver_count()
    }
}

/// Chooses the secret name for a new game.
///
/// Without rotation this is always the first configured name. With rotation a
/// random name is drawn, avoiding `current` when there is another choice.
fn pick_secret(config: &SessionConfig, current: Option<&SecretName>) -> SecretName {
    let fallback = || config.secret_names.first().cloned().unwrap_or_default();

    if !config.rotate_secrets {
        return fallback();
    }

    let candidates: Vec<&SecretName> = config
        .secret_names
        .iter()
        .filter(|name| Some(*name) != current)
        .collect();

    let mut rng = rand::rng();
    match candidates.choose(&mut rng) {
        Some(name) => (*name).clone(),
        None => current.cloned().unwrap_or_else(fallback),
    }
}
