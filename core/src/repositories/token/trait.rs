//! Token repository trait: the revocation ledger for refresh tokens.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Durable record of refresh tokens that are still usable
///
/// A refresh token is honoured only while its entry exists here; deleting
/// the entry is the only way to revoke it before it expires. One identity may
/// hold any number of entries, one per login.
///
/// Entries are keyed by the SHA-256 digest of the token (see
/// [`hash_token`](crate::domain::entities::token::hash_token)), never by
/// the raw string. Expired entries are not swept.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Record a newly issued refresh token
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use sf_core::repositories::TokenRepository;
    /// # use sf_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let user_id = Uuid::new_v4();
    /// repo.save_refresh_token(RefreshToken::new(user_id, "raw.refresh.token")).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<(), DomainError>;

    /// Find the identity owning a refresh token
    ///
    /// # Returns
    /// * `Ok(Some(Uuid))` - The token is live
    /// * `Ok(None)` - Never issued, or already revoked
    /// * `Err(DomainError)` - Database error occurred
    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<Uuid>, DomainError>;

    /// Delete every ledger entry of a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed, at least one
    /// * `Err(DomainError::NotFound)` - The user had no live entry
    /// * `Err(DomainError)` - Database error occurred
    async fn revoke_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;
}
