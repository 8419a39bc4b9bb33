//! Repository interfaces the authentication core depends on.
//!
//! - [`UserRepository`] is the credential store
//! - [`TokenRepository`] is the revocation ledger of live refresh tokens

pub mod token;
pub mod user;

pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use token::InMemoryTokenRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user::MockUserRepository;
