pub mod auth;
pub mod cors;

pub use auth::{AuthenticatedUser, SessionGate};
pub use cors::create_cors;
