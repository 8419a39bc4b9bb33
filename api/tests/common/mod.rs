//! Shared setup for the API tests: the real token codec and bcrypt over the
//! in-memory credential store and ledger.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{dev::ServiceResponse, web};
use chrono::NaiveDate;
use serde_json::{json, Value};

use sf_api::{AppState, SessionCookies};
use sf_core::{
    BcryptPasswordHasher, InMemoryTokenRepository, MockUserRepository, NewUser, PasswordHasher,
    SessionService, SessionServiceConfig, TokenService, TokenServiceConfig, User, UserRole,
};
use sf_shared::{CookieConfig, JwtConfig};

pub const TEST_SECRET: &str = "api-test-secret";
pub const PASSWORD: &str = "correct-horse";

/// Lowest cost bcrypt accepts
const BCRYPT_TEST_COST: u32 = 4;

pub type TestState =
    AppState<TokenService, InMemoryTokenRepository, MockUserRepository, BcryptPasswordHasher>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: MockUserRepository,
    pub ledger: InMemoryTokenRepository,
    pub jwt: JwtConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let jwt = JwtConfig::new(TEST_SECRET);
        let users = MockUserRepository::new();
        let ledger = InMemoryTokenRepository::new();

        let session = SessionService::new(
            Arc::new(TokenService::new(TokenServiceConfig::from(&jwt))),
            Arc::new(ledger.clone()),
            Arc::new(users.clone()),
            Arc::new(BcryptPasswordHasher::new(BCRYPT_TEST_COST)),
            SessionServiceConfig::default(),
        );
        let state = web::Data::new(AppState::new(
            session,
            SessionCookies::new(CookieConfig::default(), &jwt),
        ));

        Self {
            state,
            users,
            ledger,
            jwt,
        }
    }

    /// Codec sharing the test secret whose access tokens expired ten minutes ago
    pub fn stale_codec(&self) -> TokenService {
        TokenService::new(TokenServiceConfig {
            access_token_expiry: -600,
            ..TokenServiceConfig::from(&self.jwt)
        })
    }

    /// Put a user with `role` straight into the credential store
    pub async fn insert_user(&self, email: &str, role: UserRole) -> User {
        let hash = BcryptPasswordHasher::new(BCRYPT_TEST_COST)
            .hash(PASSWORD)
            .await
            .unwrap();
        let mut user = User::from_signup(new_user(email), hash);
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
        phone: "+15550100".to_string(),
        address: "1 Main St".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
    }
}

pub fn signup_body(email: &str) -> Value {
    json!({
        "name": "Test User",
        "date_of_birth": "1990-04-12",
        "email": email,
        "password": PASSWORD,
        "phone": "+15550100",
        "address": "1 Main St"
    })
}

pub fn login_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

/// Value of a cookie set on the response
pub fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}
