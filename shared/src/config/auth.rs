//! Authentication and session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric key used for HMAC signing
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Clock-skew tolerance applied when checking expiry, in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,

    /// Written to the `iss` claim; tokens naming another issuer are rejected
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            leeway: default_leeway(),
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Session service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Deadline for every credential store and ledger call, in milliseconds.
    /// `None` leaves collaborator I/O unbounded.
    #[serde(default)]
    pub io_timeout_ms: Option<u64>,

    /// bcrypt cost used when hashing new passwords
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            io_timeout_ms: None,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl SessionConfig {
    /// Collaborator I/O deadline as a `Duration`
    pub fn io_timeout(&self) -> Option<Duration> {
        self.io_timeout_ms.map(Duration::from_millis)
    }
}

fn default_leeway() -> u64 {
    300
}

fn default_issuer() -> String {
    String::from("storefront")
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.leeway, 300);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_session_timeout_conversion() {
        let config = SessionConfig {
            io_timeout_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(config.io_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(SessionConfig::default().io_timeout(), None);
    }
}
