//! Session service module
//!
//! Login, logout, the per-request token check with silent refresh, and the
//! admin/worker role checks layered on top of a verified identity.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionServiceConfig;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::SessionService;
