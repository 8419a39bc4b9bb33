//! Main session service implementation

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::SessionVerification;
use crate::domain::entities::token::{hash_token, RefreshToken, TokenPair, TokenStatus};
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenProvider;

use super::config::SessionServiceConfig;
use super::password::PasswordHasher;

/// Orchestrates credentials, the token codec and the revocation ledger
///
/// Holds no per-session state: everything that outlives a request lives in
/// the ledger. Cloning is cheap and clones share collaborators.
pub struct SessionService<P, L, U, H>
where
    P: TokenProvider,
    L: TokenRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    /// Token codec
    tokens: Arc<P>,
    /// Revocation ledger
    ledger: Arc<L>,
    /// Credential store
    users: Arc<U>,
    hasher: Arc<H>,
    config: SessionServiceConfig,
}

impl<P, L, U, H> Clone for SessionService<P, L, U, H>
where
    P: TokenProvider,
    L: TokenRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
            ledger: Arc::clone(&self.ledger),
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            config: self.config.clone(),
        }
    }
}

impl<P, L, U, H> SessionService<P, L, U, H>
where
    P: TokenProvider,
    L: TokenRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token codec used to sign and verify tokens
    /// * `ledger` - Revocation ledger of live refresh tokens
    /// * `users` - Credential store
    /// * `hasher` - Password hasher shared with signup
    /// * `config` - Service configuration
    pub fn new(
        tokens: Arc<P>,
        ledger: Arc<L>,
        users: Arc<U>,
        hasher: Arc<H>,
        config: SessionServiceConfig,
    ) -> Self {
        Self {
            tokens,
            ledger,
            users,
            hasher,
            config,
        }
    }

    /// Run a collaborator call under the configured I/O deadline
    async fn io<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match self.config.io_timeout {
            Some(deadline) => tokio::time::timeout(deadline, call).await.map_err(|_| {
                error!(operation, ?deadline, "Collaborator call timed out");
                DomainError::Timeout {
                    operation: operation.to_string(),
                }
            })?,
            None => call.await,
        }
    }

    /// Register a new user
    ///
    /// The password is hashed here; the credential store only ever sees the
    /// hash. No token is issued.
    pub async fn sign_up(&self, new_user: NewUser) -> DomainResult<User> {
        let password_hash = self.hasher.hash(&new_user.password).await?;
        let user = User::from_signup(new_user, password_hash);

        let created = self.io("create_user", self.users.create(user)).await?;
        info!(user_id = %created.id, "User signed up");
        Ok(created)
    }

    /// Authenticate by email and password and open a session
    ///
    /// Tokens are issued only after the password matched, and returned only
    /// once the refresh token is recorded in the ledger. A ledger failure
    /// fails the whole login.
    pub async fn log_in(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self
            .io("find_by_email", self.users.find_by_email(email))
            .await?
            .ok_or_else(|| {
                debug!("Login rejected: unknown email");
                DomainError::from(AuthError::UserNotFound)
            })?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.tokens.issue(user.id)?;

        self.io(
            "save_refresh_token",
            self.ledger
                .save_refresh_token(RefreshToken::new(user.id, &pair.refresh_token)),
        )
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to record refresh token");
            e
        })?;

        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Revoke the sessions of the refresh token's owner
    ///
    /// Every ledger entry of that identity is removed. A token that is
    /// invalid or no longer in the ledger fails with a client error.
    pub async fn log_out(&self, refresh_token: &str) -> DomainResult<()> {
        let user_id = self.verify_refresh_token(refresh_token).await?;

        let removed = self
            .io("revoke_user_tokens", self.ledger.revoke_user_tokens(user_id))
            .await?;

        info!(user_id = %user_id, removed, "User logged out");
        Ok(())
    }

    /// `Ok(true)` for a valid access token, `Ok(false)` for one that is only
    /// expired. Any other verification failure is an error.
    pub fn verify_access_token(&self, access_token: &str) -> DomainResult<bool> {
        match self.tokens.verify(access_token) {
            TokenStatus::Valid => Ok(true),
            TokenStatus::Expired => Ok(false),
            TokenStatus::Invalid(e) => Err(e.into()),
        }
    }

    /// Resolve the owner of a refresh token that verifies and is still in
    /// the ledger
    pub async fn verify_refresh_token(&self, refresh_token: &str) -> DomainResult<Uuid> {
        match self.tokens.verify(refresh_token) {
            TokenStatus::Valid => {}
            TokenStatus::Expired => return Err(TokenError::RefreshTokenExpired.into()),
            TokenStatus::Invalid(e) => return Err(e.into()),
        }

        self.io(
            "find_user_by_token",
            self.ledger.find_user_by_token(&hash_token(refresh_token)),
        )
        .await?
        .ok_or_else(|| TokenError::RefreshTokenNotFound.into())
    }

    /// Check the token pair presented with a request, refreshing the access
    /// token when only it has expired
    ///
    /// 1. An access token that fails for any reason other than expiry aborts
    ///    the check; the refresh token is not looked at.
    /// 2. The refresh token must verify and be in the ledger, otherwise
    ///    `SessionRejected` carries the access validity from step 1.
    /// 3. A valid access token is returned unchanged.
    /// 4. An expired access token is replaced by a freshly minted one.
    pub async fn verify_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<SessionVerification> {
        let access_valid = match self.tokens.verify(access_token) {
            TokenStatus::Valid => true,
            TokenStatus::Expired => false,
            TokenStatus::Invalid(e) => {
                debug!(reason = %e, "Session rejected: access token invalid");
                return Err(e.into());
            }
        };

        if let Err(e) = self.verify_refresh_token(refresh_token).await {
            warn!(access_valid, reason = %e, "Session rejected: refresh token unusable");
            return Err(DomainError::SessionRejected {
                access_valid,
                source: Box::new(e),
            });
        }

        if access_valid {
            return Ok(SessionVerification::unchanged());
        }

        let new_access_token = self.tokens.refresh(Some(access_token), refresh_token)?;
        debug!("Access token silently refreshed");
        Ok(SessionVerification::refreshed(new_access_token))
    }

    /// Subject of an access token already accepted by [`Self::verify_tokens`]
    pub fn resolve_identity(&self, access_token: &str) -> DomainResult<Uuid> {
        Ok(self.tokens.extract_identity(access_token)?)
    }

    /// Whether the user holds the admin role. Lookup failures count as `false`.
    pub async fn is_admin(&self, user_id: Uuid) -> bool {
        match self.io("is_admin", self.users.is_admin(user_id)).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Admin check failed, denying");
                false
            }
        }
    }

    /// Whether the user is a registered worker. Lookup failures count as `false`.
    pub async fn is_worker(&self, user_id: Uuid) -> bool {
        match self.io("is_worker", self.users.is_worker(user_id)).await {
            Ok(is_worker) => is_worker,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Worker check failed, denying");
                false
            }
        }
    }

    pub async fn require_admin(&self, user_id: Uuid) -> DomainResult<()> {
        if self.is_admin(user_id).await {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions.into())
        }
    }

    pub async fn require_worker(&self, user_id: Uuid) -> DomainResult<()> {
        if self.is_worker(user_id).await {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}
