use actix_web::{web, HttpResponse};
use sf_core::{PasswordHasher, TokenProvider, TokenRepository, UserRepository};
use validator::Validate;

use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Sets the `access_token` and `refresh_token` cookies on success.
///
/// ## Errors
/// - 400 Bad Request: Malformed body
/// - 401 Unauthorized: Unknown email or wrong password, no cookies set
pub async fn login<P, L, U, H>(
    state: web::Data<AppState<P, L, U, H>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    body.validate()?;

    let pair = state.session.log_in(&body.email, &body.password).await?;

    let mut response = HttpResponse::Ok();
    for cookie in state.cookies.for_pair(&pair) {
        response.cookie(cookie);
    }

    Ok(response.json(LoginResponse {
        message: "Login successful".to_string(),
        expires_in: pair.access_expires_in,
    }))
}
