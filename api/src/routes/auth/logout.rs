use actix_web::{web, HttpResponse};
use sf_core::{PasswordHasher, TokenProvider, TokenRepository, UserRepository};

use crate::dto::{LogoutRequest, MessageResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes every session of the refresh token's owner and clears both
/// cookies.
///
/// ```json
/// { "refresh_token": "..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or empty refresh token
/// - 401 Unauthorized: Refresh token invalid, expired or already revoked
pub async fn logout<P, L, U, H>(
    state: web::Data<AppState<P, L, U, H>>,
    body: web::Json<LogoutRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    if body.refresh_token.trim().is_empty() {
        return Err(ApiError::bad_request("Refresh token required"));
    }

    state.session.log_out(&body.refresh_token).await?;

    let mut response = HttpResponse::Ok();
    for cookie in state.cookies.removal() {
        response.cookie(cookie);
    }

    Ok(response.json(MessageResponse::new("Logged out successfully")))
}
