use actix_web::{web, HttpResponse};
use sf_core::{PasswordHasher, TokenProvider, TokenRepository, UserRepository};

use crate::dto::SessionInfoResponse;
use crate::middleware::AuthenticatedUser;

use super::{with_session_cookie, AppState};

/// Handler for GET /api/v1/auth/me
///
/// Identity and roles of the session owner. Role lookups that fail report
/// `false`.
pub async fn me<P, L, U, H>(
    state: web::Data<AppState<P, L, U, H>>,
    user: AuthenticatedUser,
) -> HttpResponse
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let (is_admin, is_worker) = futures_util::join!(
        state.session.is_admin(user.user_id),
        state.session.is_worker(user.user_id)
    );

    let response = HttpResponse::Ok().json(SessionInfoResponse {
        user_id: user.user_id,
        is_admin,
        is_worker,
    });
    with_session_cookie(response, &user, &state.cookies)
}
