use thiserror::Error;

use super::SessionId;

/// Errors talking to session actors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0} is closed")]
    Closed(SessionId),

    #[error("session {0} not found")]
    NotFound(SessionId),

    #[error("session limit of {0} reached")]
    CapacityReached(usize),

    #[error("invalid session config: {0}")]
    InvalidConfig(String),
}
