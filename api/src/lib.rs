//! HTTP surface of the Storefront backend: signup, login, logout and the
//! cookie-based session gate every protected endpoint goes through.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use cookies::{SessionCookies, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
pub use handlers::ApiError;
pub use middleware::auth::{AuthenticatedUser, SessionGate};
pub use routes::auth::AppState;
pub use routes::health::DependencyCheck;
