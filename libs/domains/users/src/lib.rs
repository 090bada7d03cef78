//! Users Domain
//!
//! User account management: registration, credential login with a signed
//! session token, and owner-scoped profile/avatar updates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, session cookie issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Orchestration, password hashing, error classification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, validation bounds
//! └─────────────┘
//! ```
//!
//! Failures cross exactly one seam: the repository raises a closed set of
//! store signals ([`StoreError`]), the service classifies each into the
//! request-facing taxonomy ([`UserError`]), and nothing else ever reaches
//! the HTTP boundary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{AppState, handlers, repository::InMemoryUserRepository, service::UserService};
//!
//! let state = AppState {
//!     service: UserService::new(InMemoryUserRepository::new()),
//!     jwt_auth: JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!!")),
//! };
//!
//! let router = handlers::router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{Context, UserError, UserResult, classify};
pub use handlers::AppState;
pub use models::{
    CreateUser, LoginRequest, UpdateAvatar, UpdateProfile, User, UserResponse, UserUpdate,
};
pub use repository::{InMemoryUserRepository, StoreError, UserRepository};
pub use service::UserService;
