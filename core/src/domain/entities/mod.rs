//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use session::SessionVerification;
pub use token::{hash_token, Claims, RefreshToken, TokenPair, TokenStatus};
pub use user::{NewUser, User, UserRole, DEFAULT_USER_STATUS};
