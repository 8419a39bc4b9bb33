//! Mapping of domain failures onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sf_core::{AuthError, DomainError, TokenError};
use sf_shared::{error_codes, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

/// Error returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed field validation
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    /// A session cookie is missing from a protected request
    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// Status, error code and client-facing message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Domain(error) => domain_parts(error),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                error_codes::VALIDATION_ERROR,
                format!("Invalid request: {}", errors),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                error_codes::BAD_REQUEST,
                message.clone(),
            ),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHORIZED,
                message.clone(),
            ),
        }
    }
}

fn domain_parts(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::SessionRejected { source, .. } => domain_parts(source),

        // Unknown email and wrong password read the same to the client
        DomainError::Auth(AuthError::UserNotFound | AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            "Invalid credentials".to_string(),
        ),
        DomainError::Auth(AuthError::UserAlreadyExists) => (
            StatusCode::CONFLICT,
            error_codes::CONFLICT,
            "User already exists".to_string(),
        ),
        DomainError::Auth(AuthError::InsufficientPermissions) => (
            StatusCode::FORBIDDEN,
            error_codes::FORBIDDEN,
            "Insufficient permissions".to_string(),
        ),

        DomainError::Token(TokenError::TokenExpired | TokenError::RefreshTokenExpired) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Session expired, please log in again".to_string(),
        ),
        DomainError::Token(TokenError::SubjectMismatch) => (
            StatusCode::UNAUTHORIZED,
            error_codes::USER_MISMATCH,
            TokenError::SubjectMismatch.to_string(),
        ),
        DomainError::Token(TokenError::TokenGenerationFailed) => internal(),
        // Includes a refresh token missing from the ledger, revoked or never issued
        DomainError::Token(e) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            e.to_string(),
        ),

        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::Timeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            error_codes::TIMEOUT,
            "The request timed out".to_string(),
        ),
        DomainError::Internal { .. } => internal(),
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "An internal error occurred".to_string(),
    )
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse::new(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: impl Into<DomainError>) -> StatusCode {
        ApiError::from(error.into()).status_code()
    }

    #[test]
    fn test_credential_failures_are_indistinguishable() {
        let unknown = ApiError::from(DomainError::from(AuthError::UserNotFound)).parts();
        let wrong = ApiError::from(DomainError::from(AuthError::InvalidCredentials)).parts();

        assert_eq!(unknown, wrong);
        assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.2, "Invalid credentials");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(AuthError::UserAlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status_of(AuthError::InsufficientPermissions), StatusCode::FORBIDDEN);
        assert_eq!(status_of(TokenError::InvalidSignature), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(TokenError::RefreshTokenNotFound), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(TokenError::TokenGenerationFailed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(DomainError::NotFound { resource: "refresh token".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::Timeout { operation: "find_by_email".into() }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(DomainError::Internal { message: "pool closed".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_revoked_refresh_token_is_token_invalid() {
        let (status, code, _) =
            ApiError::from(DomainError::from(TokenError::RefreshTokenNotFound)).parts();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, error_codes::TOKEN_INVALID);
    }

    #[test]
    fn test_session_rejection_maps_by_cause() {
        let rejected = DomainError::SessionRejected {
            access_valid: true,
            source: Box::new(TokenError::RefreshTokenNotFound.into()),
        };
        assert_eq!(status_of(rejected), StatusCode::UNAUTHORIZED);

        let outage = DomainError::SessionRejected {
            access_valid: false,
            source: Box::new(DomainError::Internal { message: "down".into() }),
        };
        assert_eq!(status_of(outage), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let error = ApiError::from(DomainError::Internal {
            message: "connection refused to 10.0.0.4".into(),
        });
        let (_, code, message) = error.parts();
        assert_eq!(code, error_codes::INTERNAL_ERROR);
        assert!(!message.contains("10.0.0.4"));
    }
}
