//! Authentication route handlers
//!
//! - `signup` registers a user
//! - `login` opens a session and sets the token cookies
//! - `logout` revokes the sessions of the refresh token's owner
//! - `me`, `admin_check` and `worker_check` sit behind the session gate

pub mod login;
pub mod logout;
pub mod me;
pub mod roles;
pub mod signup;

use actix_web::HttpResponse;
use sf_core::{PasswordHasher, SessionService, TokenProvider, TokenRepository, UserRepository};

use crate::cookies::SessionCookies;
use crate::middleware::AuthenticatedUser;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use roles::{admin_check, worker_check};
pub use signup::signup;

/// State shared by the authentication handlers
pub struct AppState<P, L, U, H>
where
    P: TokenProvider,
    L: TokenRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    pub session: SessionService<P, L, U, H>,
    pub cookies: SessionCookies,
}

impl<P, L, U, H> AppState<P, L, U, H>
where
    P: TokenProvider,
    L: TokenRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(session: SessionService<P, L, U, H>, cookies: SessionCookies) -> Self {
        Self { session, cookies }
    }
}

/// Re-set the access cookie on `response` when the session check minted a
/// new access token, whatever the handler's outcome
pub(crate) fn with_session_cookie(
    mut response: HttpResponse,
    user: &AuthenticatedUser,
    cookies: &SessionCookies,
) -> HttpResponse {
    if let Some(cookie) = user.refreshed_cookie(cookies) {
        if let Err(e) = response.add_cookie(&cookie) {
            tracing::warn!(user_id = %user.user_id, error = %e, "Failed to re-set access cookie");
        }
    }
    response
}
