//! Session cookies carrying the access and refresh tokens

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;
use sf_core::TokenPair;
use sf_shared::{CookieConfig, JwtConfig};

pub const ACCESS_COOKIE_NAME: &str = "access_token";
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Builds the `access_token` / `refresh_token` cookies.
///
/// Max-age of each cookie follows the lifetime of the token it carries, so a
/// browser drops the cookie at about the time the token stops verifying.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    config: CookieConfig,
    access_max_age: i64,
    refresh_max_age: i64,
}

impl SessionCookies {
    pub fn new(config: CookieConfig, jwt: &JwtConfig) -> Self {
        Self {
            config,
            access_max_age: jwt.access_token_expiry,
            refresh_max_age: jwt.refresh_token_expiry,
        }
    }

    /// Cookie for a freshly issued or silently refreshed access token
    pub fn access(&self, token: &str) -> Cookie<'static> {
        self.build(ACCESS_COOKIE_NAME, token.to_string(), self.access_max_age)
    }

    pub fn refresh(&self, token: &str) -> Cookie<'static> {
        self.build(REFRESH_COOKIE_NAME, token.to_string(), self.refresh_max_age)
    }

    /// Both cookies of a newly opened session
    pub fn for_pair(&self, pair: &TokenPair) -> [Cookie<'static>; 2] {
        [
            self.build(
                ACCESS_COOKIE_NAME,
                pair.access_token.clone(),
                pair.access_expires_in,
            ),
            self.build(
                REFRESH_COOKIE_NAME,
                pair.refresh_token.clone(),
                pair.refresh_expires_in,
            ),
        ]
    }

    /// Expired, empty cookies overwriting both session cookies
    pub fn removal(&self) -> [Cookie<'static>; 2] {
        [ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME].map(|name| {
            let mut cookie = self.build(name, String::new(), 0);
            cookie.make_removal();
            cookie
        })
    }

    fn build(&self, name: &'static str, value: String, max_age: i64) -> Cookie<'static> {
        let mut builder = Cookie::build(name, value)
            .path(self.config.path.clone())
            .max_age(Duration::seconds(max_age))
            .http_only(self.config.http_only)
            .secure(self.config.secure)
            .same_site(SameSite::Lax);

        if let Some(domain) = &self.config.domain {
            builder = builder.domain(domain.clone());
        }

        builder.finish()
    }
}

/// Value of a cookie on the request, `None` when absent or empty
pub fn read_cookie(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies() -> SessionCookies {
        SessionCookies::new(CookieConfig::default(), &JwtConfig::default())
    }

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = cookies().access("abc");

        assert_eq!(cookie.name(), ACCESS_COOKIE_NAME);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.max_age(), Some(Duration::seconds(900)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_pair_cookies_follow_token_lifetimes() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            access_expires_in: 900,
            refresh_expires_in: 604800,
        };

        let [access, refresh] = cookies().for_pair(&pair);
        assert_eq!(access.max_age(), Some(Duration::seconds(900)));
        assert_eq!(refresh.name(), REFRESH_COOKIE_NAME);
        assert_eq!(refresh.max_age(), Some(Duration::seconds(604800)));
    }

    #[test]
    fn test_removal_cookies_are_empty() {
        for cookie in cookies().removal() {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }

    #[test]
    fn test_domain_is_applied_when_configured() {
        let config = CookieConfig {
            domain: Some("shop.example.com".to_string()),
            ..Default::default()
        };
        let cookie = SessionCookies::new(config, &JwtConfig::default()).refresh("r");
        assert_eq!(cookie.domain(), Some("shop.example.com"));
    }
}
