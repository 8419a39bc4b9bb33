//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::TokenError;

/// Claims structure for JWT payload
///
/// Access and refresh tokens share this shape; only their lifetimes differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID). Empty when the token carried no `sub`.
    #[serde(default)]
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer, checked against the configured issuer on every decode
    #[serde(default)]
    pub iss: String,

    /// JWT ID, keeps two tokens minted in the same second distinct
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Creates claims for `user_id` expiring `lifetime_seconds` from now
    pub fn new(user_id: Uuid, lifetime_seconds: i64, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(lifetime_seconds);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        if self.sub.is_empty() {
            return Err(TokenError::MissingClaim {
                claim: "sub".to_string(),
            });
        }
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidTokenFormat)
    }
}

/// Token pair handed out on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub access_expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// Outcome of verifying a single token
///
/// `Expired` is the one recoverable failure: the signature checked out and
/// only the expiry (beyond leeway) is wrong. Everything else is `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Expired,
    Invalid(TokenError),
}

/// Ledger entry for an issued refresh token
///
/// Only the SHA-256 digest of the token is kept; the raw token never
/// reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Owning identity
    pub user_id: Uuid,
    /// Hex-encoded SHA-256 of the raw token
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a ledger entry for a freshly issued raw refresh token
    pub fn new(user_id: Uuid, raw_token: &str) -> Self {
        Self {
            user_id,
            token_hash: hash_token(raw_token),
            created_at: Utc::now(),
        }
    }
}

/// Hex-encoded SHA-256 digest used as the ledger key of a refresh token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_lifetime() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, 900, "storefront");

        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.iss, "storefront");
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_are_unique_per_token() {
        let user_id = Uuid::new_v4();
        assert_ne!(
            Claims::new(user_id, 60, "storefront").jti,
            Claims::new(user_id, 60, "storefront").jti
        );
    }

    #[test]
    fn test_missing_subject() {
        let claims: Claims = serde_json::from_str(r#"{"iat": 1, "exp": 2}"#).unwrap();
        assert_eq!(
            claims.user_id(),
            Err(TokenError::MissingClaim { claim: "sub".to_string() })
        );
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = hash_token("refresh");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("refresh"));
        assert_ne!(hash, hash_token("refresh2"));

        let entry = RefreshToken::new(Uuid::new_v4(), "refresh");
        assert_eq!(entry.token_hash, hash);
    }
}
