//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// Clones share state, so a test can keep a handle while the service owns another.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    workers: Arc<RwLock<HashSet<Uuid>>>,
    failing: Arc<AtomicBool>,
    delay: Option<Duration>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert a user directly, bypassing duplicate checks
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Register an existing user in the worker registry
    pub async fn add_worker(&self, user_id: Uuid) {
        self.workers.write().await.insert(user_id);
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    async fn enter(&self) -> Result<(), DomainError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "user store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.enter().await?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.enter().await?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.enter().await?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn is_admin(&self, id: Uuid) -> Result<bool, DomainError> {
        self.enter().await?;
        let users = self.users.read().await;
        Ok(users.get(&id).map(|u| u.role == UserRole::Admin).unwrap_or(false))
    }

    async fn is_worker(&self, id: Uuid) -> Result<bool, DomainError> {
        self.enter().await?;
        Ok(self.workers.read().await.contains(&id))
    }
}
