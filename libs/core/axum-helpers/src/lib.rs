//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT session authentication and middleware
//! - **[`errors`]**: the uniform `{ "message": ... }` error body
//! - **[`extractors`]**: validated JSON extraction
//! - **[`server`]**: server setup, health endpoint, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{
    Claims, JwtAuth, JwtConfig, SESSION_COOKIE, SESSION_TOKEN_TTL, extract_cookie_value,
    session_auth_middleware, session_cookie,
};

// Re-export server helpers
pub use server::{HealthResponse, create_app, health_router, shutdown_signal};

// Re-export error body
pub use errors::ErrorResponse;

// Re-export extractors
pub use extractors::ValidatedJson;
