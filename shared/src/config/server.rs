//! Server configuration module

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Origins allowed to call the API with credentials. Empty means any
    /// origin outside production.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Attributes of the `access_token` / `refresh_token` cookies.
///
/// Max-age is not configured here; it follows the JWT lifetimes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie domain
    #[serde(default)]
    pub domain: Option<String>,

    /// Cookie path
    #[serde(default = "default_path")]
    pub path: String,

    /// Secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: None,
            path: default_path(),
            secure: false,
            http_only: default_http_only(),
        }
    }
}

fn default_path() -> String {
    String::from("/")
}

fn default_http_only() -> bool {
    true
}
