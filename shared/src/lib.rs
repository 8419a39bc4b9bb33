//! Shared configuration and common types for the Storefront server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and the layered loader
//! - The error body returned by every API endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CookieConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, ServerConfig, SessionConfig,
};
pub use errors::{error_codes, ErrorResponse};
