//! Session actor message types.

use crate::game::entities::{GameView, GuessOutcome};
use tokio::sync::{oneshot, watch};

/// Messages that can be sent to a SessionActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Raw guess input, validated by the game
    Guess {
        letter: String,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Start a new game
    Restart {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Get the current snapshot
    GetView {
        response: oneshot::Sender<GameView>,
    },

    /// Subscribe to snapshots. The returned receiver reports the current one
    /// as unseen; dropping it unsubscribes.
    Subscribe {
        response: oneshot::Sender<watch::Receiver<GameView>>,
    },

    /// Stop the actor
    Close { response: oneshot::Sender<()> },
}

/// Response from session operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResponse {
    /// A guess was classified, with the snapshot after it
    Guessed { outcome: GuessOutcome, view: GameView },

    /// A new game started
    Restarted { view: GameView },
}

impl SessionResponse {
    pub fn view(&self) -> &GameView {
        match self {
            Self::Guessed { view, .. } | Self::Restarted { view } => view,
        }
    }

    pub fn outcome(&self) -> Option<GuessOutcome> {
        match self {
            Self::Guessed { outcome, .. } => Some(*outcome),
            Self::Restarted { .. } => None,
        }
    }

    pub fn into_view(self) -> GameView {
        match self {
            Self::Guessed { view, .. } | Self::Restarted { view } => view,
        }
    }
}
