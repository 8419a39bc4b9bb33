//! Database module - PostgreSQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Credential store and refresh token ledger repositories

pub mod connection;
pub mod postgres;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PgTokenRepository, PgUserRepository};
