//! In-memory TokenRepository with call counters and failure injection

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::trait_::TokenRepository;

#[derive(Default)]
struct Counters {
    saves: AtomicUsize,
    lookups: AtomicUsize,
    revokes: AtomicUsize,
}

/// Ledger kept in a `Vec` behind a `tokio` lock
///
/// Clones share state, so tests can keep a handle to inspect counters after
/// handing a clone to the service.
#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<Vec<RefreshToken>>>,
    counters: Arc<Counters>,
    fail_saves: Arc<AtomicBool>,
    fail_all: Arc<AtomicBool>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `save_refresh_token` fail while lookups keep working
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every call fail with an internal error
    pub fn set_failing(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of `save_refresh_token` calls, failed ones included
    pub fn save_calls(&self) -> usize {
        self.counters.saves.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.counters.lookups.load(Ordering::SeqCst)
    }

    pub fn revoke_calls(&self) -> usize {
        self.counters.revokes.load(Ordering::SeqCst)
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "token ledger unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<(), DomainError> {
        self.counters.saves.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "failed to persist refresh token".to_string(),
            });
        }

        self.tokens.write().await.push(token);
        Ok(())
    }

    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<Uuid>, DomainError> {
        self.counters.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .find(|t| t.token_hash == token_hash)
            .map(|t| t.user_id))
    }

    async fn revoke_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.counters.revokes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|t| t.user_id != user_id);
        let removed = before - tokens.len();

        if removed == 0 {
            return Err(DomainError::NotFound {
                resource: format!("refresh tokens for user {}", user_id),
            });
        }
        Ok(removed)
    }
}
