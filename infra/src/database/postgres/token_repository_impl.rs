//! PostgreSQL implementation of the refresh token ledger.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use sf_core::domain::entities::token::RefreshToken;
use sf_core::errors::DomainError;
use sf_core::repositories::TokenRepository;

use super::query_failed;

/// PostgreSQL implementation of TokenRepository over the `token` table
///
/// Rows hold the SHA-256 digest of the refresh token, never the raw value.
#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO token (user_id, token_hash, created_at) VALUES ($1, $2, $3)")
            .bind(token.user_id)
            .bind(&token.token_hash)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to save refresh token", e))?;

        Ok(())
    }

    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<Uuid>, DomainError> {
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM token WHERE token_hash = $1 LIMIT 1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to look up refresh token", e))
    }

    async fn revoke_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM token WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to revoke refresh tokens", e))?;

        match result.rows_affected() {
            0 => Err(DomainError::NotFound {
                resource: format!("refresh tokens for user {}", user_id),
            }),
            removed => Ok(removed as usize),
        }
    }
}
