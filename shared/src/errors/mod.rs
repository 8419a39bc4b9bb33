//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes returned in `ErrorResponse::error`
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const USER_MISMATCH: &str = "USER_MISMATCH";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_are_skipped_when_empty() {
        let body = serde_json::to_value(ErrorResponse::new(error_codes::UNAUTHORIZED, "nope")).unwrap();
        assert!(body.get("details").is_none());

        let body = serde_json::to_value(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, "bad").add_detail("email", "invalid"),
        )
        .unwrap();
        assert_eq!(body["details"]["email"], "invalid");
    }
}
