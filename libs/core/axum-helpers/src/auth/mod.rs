//! Stateless JWT session authentication.
//!
//! This module provides:
//! - Session token creation and verification ([`JwtAuth`])
//! - The session cookie helpers
//! - Authentication middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, session_auth_middleware};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! let protected = Router::new()
//!     .route("/users/me", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, session_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{Claims, JwtAuth, SESSION_COOKIE, SESSION_TOKEN_TTL, session_cookie};
pub use middleware::{extract_cookie_value, session_auth_middleware};
