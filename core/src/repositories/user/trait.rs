//! User repository trait defining the interface of the credential store.
//!
//! The authentication core never writes roles; it only reads them. Worker
//! promotion and admin assignment happen elsewhere.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example
/// ```no_run
/// # use sf_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_email("ivan@example.com").await? {
///     Some(user) => println!("User found: {}", user.id),
///     None => println!("User not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email already registered
    /// * `Err(DomainError)` - Database error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found, including the stored password hash
    /// * `Ok(None)` - No user registered under this email
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Whether the user holds the admin role
    ///
    /// An unknown id is `Ok(false)`, not an error.
    async fn is_admin(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Whether the user is registered as a warehouse worker
    ///
    /// An unknown id is `Ok(false)`, not an error.
    async fn is_worker(&self, id: Uuid) -> Result<bool, DomainError>;
}
