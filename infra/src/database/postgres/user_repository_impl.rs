//! PostgreSQL implementation of the credential store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use sf_core::domain::entities::user::{User, UserRole};
use sf_core::errors::{AuthError, DomainError};
use sf_core::repositories::UserRepository;

use super::query_failed;

const USER_COLUMNS: &str =
    "id, name, date_of_birth, email, password_hash, phone, address, status, role, created_at";

/// PostgreSQL implementation of UserRepository over `users` and `worker`
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to read users.{}: {}", name, e),
        };

        let role: String = row.try_get("role").map_err(|e| column("role", e))?;
        let role = role.parse::<UserRole>().unwrap_or_else(|_| {
            tracing::warn!(role = %role, "Unknown role stored, treating as customer");
            UserRole::Customer
        });

        Ok(User {
            id: row.try_get::<Uuid, _>("id").map_err(|e| column("id", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            phone: row.try_get("phone").map_err(|e| column("phone", e))?,
            address: row.try_get("address").map_err(|e| column("address", e))?,
            date_of_birth: row
                .try_get::<NaiveDate, _>("date_of_birth")
                .map_err(|e| column("date_of_birth", e))?,
            status: row.try_get("status").map_err(|e| column("status", e))?,
            role,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }

    async fn find_one(&self, filter: &str, bind: FindBy<'_>) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, filter);
        let query = sqlx::query(&sql);
        let query = match bind {
            FindBy::Email(email) => query.bind(email),
            FindBy::Id(id) => query.bind(id),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to load user", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

enum FindBy<'a> {
    Email(&'a str),
    Id(Uuid),
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            USER_COLUMNS
        );

        sqlx::query(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(user.date_of_birth)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.phone)
            .bind(&user.address)
            .bind(&user.status)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::from(AuthError::UserAlreadyExists)
                }
                other => query_failed("Failed to create user", other),
            })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", FindBy::Email(email)).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", FindBy::Id(id)).await
    }

    async fn is_admin(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = $2)",
        )
        .bind(id)
        .bind(UserRole::Admin.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to check admin role", e))
    }

    async fn is_worker(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM worker WHERE id_user = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to check worker role", e))
    }
}
