use actix_web::{web, HttpResponse};
use sf_core::{PasswordHasher, TokenProvider, TokenRepository, UserRepository};

use crate::dto::{SignUpRequest, SignUpResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// # Request
///
/// ```json
/// {
///     "name": "Ann",
///     "date_of_birth": "1990-04-12",
///     "email": "ann@example.com",
///     "password": "...",
///     "phone": "+15550100",
///     "address": "1 Main St"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed body, invalid email or date
/// - 409 Conflict: Email already registered
pub async fn signup<P, L, U, H>(
    state: web::Data<AppState<P, L, U, H>>,
    body: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let new_user = body.into_inner().into_new_user()?;
    let user = state.session.sign_up(new_user).await?;

    Ok(HttpResponse::Created().json(SignUpResponse {
        message: "User registered successfully".to_string(),
        user_id: user.id,
    }))
}
