//! Token codec
//!
//! Stateless signing and verification of access/refresh token pairs over a
//! shared HMAC secret. Nothing here touches storage; ledger checks belong to
//! the session service.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{TokenProvider, TokenService};
