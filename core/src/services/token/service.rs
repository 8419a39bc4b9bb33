//! HMAC token service implementation

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, TokenStatus};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Algorithms accepted on verification. Tokens are always signed with HS256.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Token codec used by the session service
///
/// All operations are pure and synchronous; implementations must not do I/O.
pub trait TokenProvider: Send + Sync {
    /// Sign a fresh access/refresh pair for `user_id`
    fn issue(&self, user_id: Uuid) -> Result<TokenPair, TokenError>;

    /// Check signature and expiry, telling "expired" apart from "invalid"
    fn verify(&self, token: &str) -> TokenStatus;

    /// Read the subject of a token whose signature is valid, ignoring expiry
    fn extract_identity(&self, token: &str) -> Result<Uuid, TokenError>;

    /// Mint a new access token from a valid refresh token.
    ///
    /// When `access_token` carries a valid signature, its subject must match
    /// the refresh token's or the call fails with `SubjectMismatch`.
    fn refresh(&self, access_token: Option<&str>, refresh_token: &str)
        -> Result<String, TokenError>;
}

/// Service for signing and verifying JWT tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Full check, expiry with leeway
    validation: Validation,
    /// Signature and issuer only
    signature_only: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = config.leeway;
        validation.validate_exp = true;
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let mut signature_only = validation.clone();
        signature_only.validate_exp = false;
        signature_only.set_required_spec_claims(&["iss"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            signature_only,
        }
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }

    fn decode_jwt(&self, token: &str, validation: &Validation) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }

    fn claims(&self, user_id: Uuid, lifetime_seconds: i64) -> Claims {
        Claims::new(user_id, lifetime_seconds, &self.config.issuer)
    }

    fn generate_access_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.encode_jwt(&self.claims(user_id, self.config.access_token_expiry))
    }
}

impl TokenProvider for TokenService {
    fn issue(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        let access_token = self.generate_access_token(user_id)?;
        let refresh_token =
            self.encode_jwt(&self.claims(user_id, self.config.refresh_token_expiry))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_expiry,
            refresh_expires_in: self.config.refresh_token_expiry,
        })
    }

    fn verify(&self, token: &str) -> TokenStatus {
        match self
            .decode_jwt(token, &self.validation)
            .and_then(|claims| claims.user_id())
        {
            Ok(_) => TokenStatus::Valid,
            Err(TokenError::TokenExpired) => TokenStatus::Expired,
            Err(e) => TokenStatus::Invalid(e),
        }
    }

    fn extract_identity(&self, token: &str) -> Result<Uuid, TokenError> {
        self.decode_jwt(token, &self.signature_only)?.user_id()
    }

    fn refresh(
        &self,
        access_token: Option<&str>,
        refresh_token: &str,
    ) -> Result<String, TokenError> {
        let refresh_claims = self
            .decode_jwt(refresh_token, &self.validation)
            .map_err(|e| match e {
                TokenError::TokenExpired => TokenError::RefreshTokenExpired,
                other => other,
            })?;
        let user_id = refresh_claims.user_id()?;

        // An access token that does not even verify cannot be compared and is
        // treated as absent
        if let Some(access_subject) = access_token
            .and_then(|token| self.decode_jwt(token, &self.signature_only).ok())
            .and_then(|claims| claims.user_id().ok())
        {
            if access_subject != user_id {
                tracing::warn!(
                    refresh_subject = %user_id,
                    access_subject = %access_subject,
                    "Refresh rejected: token user mismatch"
                );
                return Err(TokenError::SubjectMismatch);
            }
        }

        self.generate_access_token(user_id)
    }
}

fn map_jwt_error(error: JwtError) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::InvalidAlgorithm
        }
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
            claim: claim.clone(),
        },
        _ => TokenError::InvalidTokenFormat,
    }
}
