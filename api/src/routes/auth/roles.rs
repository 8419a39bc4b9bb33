use actix_web::{web, HttpResponse, ResponseError};
use sf_core::{PasswordHasher, TokenProvider, TokenRepository, UserRepository};

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;

use super::{with_session_cookie, AppState};

/// Handler for GET /api/v1/auth/admin-check
///
/// 200 for admins, 403 for everyone else including when the role lookup
/// itself failed.
pub async fn admin_check<P, L, U, H>(
    state: web::Data<AppState<P, L, U, H>>,
    user: AuthenticatedUser,
) -> HttpResponse
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let response = match state.session.require_admin(user.user_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("admin")),
        Err(e) => ApiError::from(e).error_response(),
    };
    with_session_cookie(response, &user, &state.cookies)
}

/// Handler for GET /api/v1/auth/worker-check
pub async fn worker_check<P, L, U, H>(
    state: web::Data<AppState<P, L, U, H>>,
    user: AuthenticatedUser,
) -> HttpResponse
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let response = match state.session.require_worker(user.user_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("worker")),
        Err(e) => ApiError::from(e).error_response(),
    };
    with_session_cookie(response, &user, &state.cookies)
}
