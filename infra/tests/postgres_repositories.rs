//! PostgreSQL repository tests
//!
//! Run against a scratch database:
//! `DATABASE_URL=postgres://... cargo test -p sf_infra -- --ignored`

use chrono::NaiveDate;
use uuid::Uuid;

use sf_core::domain::entities::token::{hash_token, RefreshToken};
use sf_core::domain::entities::user::{NewUser, User, UserRole};
use sf_core::errors::{AuthError, DomainError};
use sf_core::repositories::{TokenRepository, UserRepository};
use sf_infra::{DatabasePool, PgTokenRepository, PgUserRepository};
use sf_shared::DatabaseConfig;

async fn pool() -> DatabasePool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = DatabasePool::new(&DatabaseConfig::new(url).with_max_connections(2))
        .await
        .expect("database reachable");
    pool.run_migrations().await.expect("migrations apply");
    pool
}

fn user() -> User {
    let email = format!("{}@example.com", Uuid::new_v4());
    User::from_signup(
        NewUser {
            name: "Integration".to_string(),
            email,
            password: String::new(),
            phone: "+70000000000".to_string(),
            address: "Test street 1".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        },
        "$2b$04$placeholder".to_string(),
    )
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_user_round_trip_and_roles() {
    let pool = pool().await;
    let users = PgUserRepository::new(pool.get_pool().clone());

    let created = users.create(user()).await.unwrap();
    let found = users.find_by_email(&created.email).await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.role, UserRole::Customer);
    assert_eq!(found.password_hash, created.password_hash);
    assert!(users.find_by_id(created.id).await.unwrap().is_some());
    assert!(!users.is_admin(created.id).await.unwrap());
    assert!(!users.is_worker(created.id).await.unwrap());

    sqlx::query("INSERT INTO worker (id, id_user, job_title) VALUES ($1, $2, 'picker')")
        .bind(Uuid::new_v4())
        .bind(created.id)
        .execute(pool.get_pool())
        .await
        .unwrap();
    assert!(users.is_worker(created.id).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_duplicate_email_is_rejected() {
    let pool = pool().await;
    let users = PgUserRepository::new(pool.get_pool().clone());
    let first = users.create(user()).await.unwrap();

    let mut duplicate = user();
    duplicate.email = first.email.clone();

    assert!(matches!(
        users.create(duplicate).await,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_token_ledger_lifecycle() {
    let pool = pool().await;
    let users = PgUserRepository::new(pool.get_pool().clone());
    let ledger = PgTokenRepository::new(pool.get_pool().clone());
    let owner = users.create(user()).await.unwrap();

    ledger.save_refresh_token(RefreshToken::new(owner.id, "first")).await.unwrap();
    ledger.save_refresh_token(RefreshToken::new(owner.id, "second")).await.unwrap();

    assert_eq!(ledger.find_user_by_token(&hash_token("first")).await.unwrap(), Some(owner.id));
    assert_eq!(ledger.revoke_user_tokens(owner.id).await.unwrap(), 2);
    assert_eq!(ledger.find_user_by_token(&hash_token("second")).await.unwrap(), None);
    assert!(matches!(
        ledger.revoke_user_tokens(owner.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
