//! Cookie-based session gate for protected endpoints.
//!
//! Handlers take an [`AuthenticatedUser`] argument; extracting it runs the
//! token pair check of the session service against the `access_token` and
//! `refresh_token` cookies. When the check minted a new access token the
//! handler must hand it back through [`AuthenticatedUser::refreshed_cookie`].

use actix_web::{cookie::Cookie, dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use sf_core::{
    DomainError, DomainResult, PasswordHasher, SessionService, SessionVerification,
    TokenProvider, TokenRepository, UserRepository,
};
use uuid::Uuid;

use crate::cookies::{read_cookie, SessionCookies, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
use crate::handlers::ApiError;

/// Object-safe view of the session service used by the extractor, so the
/// extractor does not depend on the service's collaborator types.
#[async_trait]
pub trait SessionGate: Send + Sync {
    async fn verify_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<SessionVerification>;

    fn resolve_identity(&self, access_token: &str) -> DomainResult<Uuid>;
}

#[async_trait]
impl<P, L, U, H> SessionGate for SessionService<P, L, U, H>
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn verify_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<SessionVerification> {
        SessionService::verify_tokens(self, access_token, refresh_token).await
    }

    fn resolve_identity(&self, access_token: &str) -> DomainResult<Uuid> {
        SessionService::resolve_identity(self, access_token)
    }
}

/// Caller of a protected endpoint whose token pair passed the session check
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    /// Set when the access token had expired and was silently replaced
    pub refreshed_access_token: Option<String>,
}

impl AuthenticatedUser {
    /// Access cookie to re-set on the response, if a new token was minted
    pub fn refreshed_cookie(&self, cookies: &SessionCookies) -> Option<Cookie<'static>> {
        self.refreshed_access_token
            .as_deref()
            .map(|token| cookies.access(token))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req).await })
    }
}

async fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    // A second extraction within the same request reuses the first result
    if let Some(user) = req.extensions().get::<AuthenticatedUser>() {
        return Ok(user.clone());
    }

    let gate = req
        .app_data::<web::Data<dyn SessionGate>>()
        .cloned()
        .ok_or_else(|| DomainError::Internal {
            message: "session gate is not registered".to_string(),
        })?;

    let access_token = read_cookie(req, ACCESS_COOKIE_NAME)
        .ok_or_else(|| ApiError::unauthorized("access token missing"))?;
    let refresh_token = read_cookie(req, REFRESH_COOKIE_NAME)
        .ok_or_else(|| ApiError::unauthorized("refresh token missing"))?;

    let verification = gate.verify_tokens(&access_token, &refresh_token).await?;
    if !verification.is_authenticated() {
        return Err(ApiError::unauthorized("session is not valid"));
    }

    let user_id = gate.resolve_identity(verification.effective_access_token(&access_token))?;
    if verification.new_access_token.is_some() {
        tracing::debug!(user_id = %user_id, "Re-issuing access cookie after silent refresh");
    }

    let user = AuthenticatedUser {
        user_id,
        refreshed_access_token: verification.new_access_token,
    };
    req.extensions_mut().insert(user.clone());
    Ok(user)
}
