//! Session manager for spawning and tracking session actors.

use super::{
    SessionId,
    actor::{SessionActor, SessionHandle},
    config::SessionConfig,
    errors::SessionError,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry of live sessions
#[derive(Clone)]
pub struct SessionManager {
    /// Config every new session is created with
    config: SessionConfig,

    /// Active session handles
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,

    /// Upper bound on concurrent sessions
    max_sessions: usize,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfig` if `config` does not validate or
    /// `max_sessions` is zero.
    pub fn new(config: SessionConfig, max_sessions: usize) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;
        if max_sessions == 0 {
            return Err(SessionError::InvalidConfig(
                "Max sessions must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create and spawn a new session
    pub async fn create_session(&self) -> Result<SessionHandle, SessionError> {
        let mut sessions = self.sessions.write().await;

        // Drop handles of actors that stopped on their own
        sessions.retain(|_, handle| !handle.is_closed());

        if sessions.len() >= self.max_sessions {
            return Err(SessionError::CapacityReached(self.max_sessions));
        }

        let id = Uuid::new_v4();
        let (actor, handle) = SessionActor::new(id, self.config.clone())?;
        sessions.insert(id, handle.clone());
        drop(sessions);

        tokio::spawn(actor.run());

        log::info!("Created and spawned session {}", id);

        Ok(handle)
    }

    /// Get a session handle
    pub async fn get_session(&self, id: SessionId) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).cloned()
    }

    /// Close a session and forget it
    pub async fn close_session(&self, id: SessionId) -> Result<(), SessionError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or(SessionError::NotFound(id))?;

        match handle.close().await {
            // Already stopped is as good as closed
            Ok(()) | Err(SessionError::Closed(_)) => {
                log::info!("Closed session {}", id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Close every session, used on shutdown
    pub async fn close_all(&self) {
        let handles: Vec<SessionHandle> = {
            let mut sessions = self.sessions.write().await;
            sessions.drain().map(|(_, handle)| handle).collect()
        };

        for handle in handles {
            let _ = handle.close().await;
        }
    }

    /// Number of registered sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
