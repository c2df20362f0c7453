//! Repository operation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings shared by every repository operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Upper bound for a single store call (or a whole cursor drain) in seconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_seconds: u64,
}

impl RepositoryConfig {
    /// The per-call execution bound as a [`Duration`].
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_seconds)
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            operation_timeout_seconds: default_operation_timeout(),
        }
    }
}

fn default_operation_timeout() -> u64 {
    5
}
