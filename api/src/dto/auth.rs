use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sf_core::NewUser;
use uuid::Uuid;
use validator::Validate;

use crate::handlers::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// `YYYY-MM-DD`
    pub date_of_birth: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    #[validate(length(min = 1))]
    pub address: String,
}

impl SignUpRequest {
    /// Validate the body and turn it into the signup input of the session service
    pub fn into_new_user(self) -> Result<NewUser, ApiError> {
        self.validate()?;

        let date_of_birth = NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")
            .map_err(|_| ApiError::bad_request("date_of_birth must be formatted as YYYY-MM-DD"))?;

        Ok(NewUser {
            name: self.name,
            email: self.email,
            password: self.password,
            phone: self.phone,
            address: self.address,
            date_of_birth,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Identity and roles of the caller of `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub user_id: Uuid,
    pub is_admin: bool,
    pub is_worker: bool,
}
