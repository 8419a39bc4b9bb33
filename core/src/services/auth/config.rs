//! Configuration for the session service

use std::time::Duration;

use sf_shared::SessionConfig;

/// Configuration for the session service
#[derive(Debug, Clone, Default)]
pub struct SessionServiceConfig {
    /// Deadline for each credential store and ledger call
    pub io_timeout: Option<Duration>,
}

impl From<&SessionConfig> for SessionServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            io_timeout: config.io_timeout(),
        }
    }
}
