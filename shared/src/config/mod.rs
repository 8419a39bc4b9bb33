//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT lifetimes, signing secret and session I/O deadlines
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding and session cookie attributes

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{JwtConfig, SessionConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CookieConfig, ServerConfig};

/// Prefix of environment variables overriding configuration values,
/// e.g. `SF_JWT__SECRET` or `SF_DATABASE__URL`.
pub const ENV_PREFIX: &str = "SF";

/// Errors raised while assembling the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session service configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment, before any file or variable overrides
    pub fn for_environment(environment: Environment) -> Self {
        let cookie = match environment {
            Environment::Production => CookieConfig {
                secure: true,
                ..Default::default()
            },
            _ => CookieConfig::default(),
        };

        Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            cookie,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from defaults, `config/<environment>.toml` and
    /// `SF_`-prefixed environment variables, in increasing priority.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let defaults = Self::for_environment(environment);

        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&defaults)?)
            .add_source(
                ::config::File::with_name(&format!("config/{}", environment)).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that must never reach a running server
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "jwt.secret must be set in production".to_string(),
            ));
        }
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("jwt.secret must not be empty".to_string()));
        }
        if self.jwt.access_token_expiry <= 0 || self.jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "token lifetimes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
