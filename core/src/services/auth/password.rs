//! Password hashing behind a trait so tests can skip bcrypt's cost

use async_trait::async_trait;

use crate::errors::DomainError;

/// Salted password hashing with constant-time comparison
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain password for storage
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Compare a plain password with a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// bcrypt hasher; both operations run on the blocking pool
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("failed to hash password: {}", e),
            })
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password verification task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("stored password hash is unreadable: {}", e),
            })
    }
}
