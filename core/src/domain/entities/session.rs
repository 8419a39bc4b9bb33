//! Outcome of the per-request session check.

/// Result of checking an access/refresh token pair on a protected request.
///
/// Computed fresh on every request and never cached. When the access token
/// had expired but the refresh token was still live, `new_access_token`
/// carries the replacement the caller must hand back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionVerification {
    pub new_access_token: Option<String>,
    pub access_valid: bool,
    pub refresh_valid: bool,
}

impl SessionVerification {
    /// The presented access token was still valid; nothing was minted
    pub fn unchanged() -> Self {
        Self {
            new_access_token: None,
            access_valid: true,
            refresh_valid: true,
        }
    }

    /// The access token was replaced through a silent refresh
    pub fn refreshed(new_access_token: String) -> Self {
        Self {
            new_access_token: Some(new_access_token),
            access_valid: true,
            refresh_valid: true,
        }
    }

    /// Whether the request may proceed
    pub fn is_authenticated(&self) -> bool {
        self.access_valid && self.refresh_valid
    }

    /// The access token the request should be attributed to: the freshly
    /// minted one if any, otherwise the one presented.
    pub fn effective_access_token<'a>(&'a self, presented: &'a str) -> &'a str {
        self.new_access_token.as_deref().unwrap_or(presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_access_token() {
        let unchanged = SessionVerification::unchanged();
        assert_eq!(unchanged.effective_access_token("old"), "old");

        let refreshed = SessionVerification::refreshed("new".to_string());
        assert_eq!(refreshed.effective_access_token("old"), "new");
        assert!(refreshed.is_authenticated());
        assert!(!SessionVerification::default().is_authenticated());
    }
}
