//! Session configuration.

use crate::game::{
    constants::{DEFAULT_CHANCES, MAX_CHANCES},
    entities::SecretName,
};

/// Settings shared by every session a manager spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Candidate secret names. The first one is used unless rotation is on.
    pub secret_names: Vec<SecretName>,

    /// Wrong guesses allowed per game
    pub max_chances: u8,

    /// Pick a random secret name on every new game
    pub rotate_secrets: bool,

    /// Capacity of the actor inbox
    pub inbox_capacity: usize,

    /// Capacity of each connection's reply queue
    pub subscriber_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret_names: vec![SecretName::default()],
            max_chances: DEFAULT_CHANCES,
            rotate_secrets: false,
            inbox_capacity: 32,
            subscriber_capacity: 32,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.secret_names.is_empty() {
            return Err("At least one secret name is required".to_string());
        }

        if self.max_chances == 0 || self.max_chances > MAX_CHANCES {
            return Err(format!("Max chances must be between 1 and {MAX_CHANCES}"));
        }

        if self.inbox_capacity == 0 || self.subscriber_capacity == 0 {
            return Err("Channel capacities must be greater than zero".to_string());
        }

        Ok(())
    }
}
