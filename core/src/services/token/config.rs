//! Configuration for the token service

use sf_shared::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
    /// Clock-skew tolerance in seconds
    pub leeway: u64,
    /// Written to `iss` on issue and required to match on decode
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            access_token_expiry: jwt.access_token_expiry,
            refresh_token_expiry: jwt.refresh_token_expiry,
            leeway: jwt.leeway,
            issuer: jwt.issuer.clone(),
        }
    }
}
