//! Mock collaborators shared by the session service tests

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{TokenPair, TokenStatus};
use crate::domain::entities::user::{NewUser, User, UserRole};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryTokenRepository, MockUserRepository};
use crate::services::auth::{PasswordHasher, SessionService, SessionServiceConfig};
use crate::services::token::{TokenProvider, TokenService, TokenServiceConfig};

pub const TEST_SECRET: &str = "session-test-secret";
pub const PASSWORD: &str = "s3cret-pass";

/// Stores passwords as `plain:<password>` so tests avoid bcrypt's cost
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

/// Token provider returning canned values, counting `issue` calls
#[derive(Default)]
pub struct StubTokenProvider {
    pub issue_calls: AtomicUsize,
    pub fail_issue: AtomicBool,
}

impl TokenProvider for StubTokenProvider {
    fn issue(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        self.issue_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_issue.load(Ordering::SeqCst) {
            return Err(TokenError::TokenGenerationFailed);
        }
        Ok(TokenPair {
            access_token: format!("access-{}", user_id),
            refresh_token: format!("refresh-{}", user_id),
            access_expires_in: 900,
            refresh_expires_in: 604800,
        })
    }

    fn verify(&self, _token: &str) -> TokenStatus {
        TokenStatus::Valid
    }

    fn extract_identity(&self, _token: &str) -> Result<Uuid, TokenError> {
        Err(TokenError::InvalidTokenFormat)
    }

    fn refresh(&self, _access: Option<&str>, _refresh: &str) -> Result<String, TokenError> {
        Err(TokenError::TokenGenerationFailed)
    }
}

pub fn token_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
        leeway: 300,
        issuer: "storefront".to_string(),
    }
}

/// Codec sharing the test secret whose access tokens are already a full
/// ten minutes past expiry, well beyond the leeway
pub fn stale_codec() -> TokenService {
    TokenService::new(TokenServiceConfig {
        access_token_expiry: -600,
        ..token_config()
    })
}

pub type TestSessionService =
    SessionService<TokenService, InMemoryTokenRepository, MockUserRepository, PlainTextHasher>;

/// Session service over the real codec and in-memory collaborators
pub struct Fixture {
    pub service: TestSessionService,
    pub codec: Arc<TokenService>,
    pub ledger: InMemoryTokenRepository,
    pub users: MockUserRepository,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_users(MockUserRepository::new(), SessionServiceConfig::default())
    }

    pub fn with_users(users: MockUserRepository, config: SessionServiceConfig) -> Self {
        let codec = Arc::new(TokenService::new(token_config()));
        let ledger = InMemoryTokenRepository::new();

        let service = SessionService::new(
            Arc::clone(&codec),
            Arc::new(ledger.clone()),
            Arc::new(users.clone()),
            Arc::new(PlainTextHasher),
            config,
        );

        Self {
            service,
            codec,
            ledger,
            users,
        }
    }

    /// Store a user with [`PASSWORD`] directly in the credential store
    pub async fn add_user(&self, email: &str, role: UserRole) -> User {
        let mut user = User::from_signup(new_user(email), format!("plain:{}", PASSWORD));
        user.role = role;
        self.users.insert(user.clone()).await;
        user
    }
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        phone: "+79990001122".to_string(),
        address: "1 Warehouse Lane".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1995, 1, 31).unwrap(),
    }
}
