use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::ErrorResponse;
use thiserror::Error;

use crate::repository::StoreError;

/// Request-facing error taxonomy.
///
/// A closed set, each variant carrying only a human-readable message. This
/// is the entire error surface of the HTTP API: whatever a collaborator
/// raises ends up as exactly one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    /// A record failed field validation (400)
    #[error("{0}")]
    Validation(String),

    /// A supplied identifier is not well-formed (400)
    #[error("{0}")]
    Cast(String),

    /// No record matched the requested identity (404)
    #[error("{0}")]
    NotFound(String),

    /// Credentials did not match any record (401)
    #[error("{0}")]
    Authorisation(String),

    /// Missing or invalid session token (403)
    #[error("{0}")]
    Forbidden(String),

    /// Unclassified failure; detail is diagnostic only (500)
    #[error("{0}")]
    Server(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Wrap an unrecognized failure as a ServerError with opaque detail.
    pub fn server(detail: impl std::fmt::Display) -> Self {
        UserError::Server(format!("Server error: {}", detail))
    }

    pub fn forbidden() -> Self {
        UserError::Forbidden("Authorisation error.".to_string())
    }
}

/// The operation during which a store failure was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    LookupById,
    Create,
    Update,
    Login,
}

/// Map a store failure signal to exactly one taxonomy member.
///
/// The not-found / bad-credentials sentinels are matched before the generic
/// validation and cast signals; any signal the context does not recognize
/// falls through to ServerError.
pub fn classify(failure: StoreError, context: Context) -> UserError {
    match (context, failure) {
        (Context::Login, StoreError::NotFound) => {
            UserError::Authorisation("Wrong email or password".to_string())
        }
        (Context::LookupById | Context::Update, StoreError::NotFound) => {
            UserError::NotFound("User not found".to_string())
        }
        (Context::LookupById | Context::Update, StoreError::MalformedId(_)) => {
            UserError::Cast("Wrong user Id".to_string())
        }
        (Context::Create | Context::Update, StoreError::Validation(_)) => {
            UserError::Validation("Validation error".to_string())
        }
        (_, other) => UserError::server(other),
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UserError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            UserError::Cast(msg) => (StatusCode::BAD_REQUEST, msg),
            UserError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            UserError::Authorisation(msg) => (StatusCode::UNAUTHORIZED, msg),
            UserError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            UserError::Server(msg) => {
                tracing::error!("Unclassified failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        if status != StatusCode::INTERNAL_SERVER_ERROR {
            tracing::debug!(status = %status, "Request failed: {}", message);
        }

        ErrorResponse::new(message).into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_classification() {
        assert_eq!(
            classify(StoreError::NotFound, Context::LookupById),
            UserError::NotFound("User not found".to_string())
        );
        assert_eq!(
            classify(StoreError::MalformedId("abc".to_string()), Context::LookupById),
            UserError::Cast("Wrong user Id".to_string())
        );
    }

    #[test]
    fn test_create_classification() {
        assert_eq!(
            classify(StoreError::Validation("name too short".to_string()), Context::Create),
            UserError::Validation("Validation error".to_string())
        );

        // The unique-index violation is not a validation failure; it stays
        // in the unclassified branch.
        let err = classify(
            StoreError::DuplicateEmail("a@b.com".to_string()),
            Context::Create,
        );
        assert!(matches!(err, UserError::Server(_)));
    }

    #[test]
    fn test_update_classification() {
        assert_eq!(
            classify(StoreError::NotFound, Context::Update),
            UserError::NotFound("User not found".to_string())
        );
        assert_eq!(
            classify(StoreError::Validation("bad".to_string()), Context::Update),
            UserError::Validation("Validation error".to_string())
        );
        assert_eq!(
            classify(StoreError::MalformedId("1".to_string()), Context::Update),
            UserError::Cast("Wrong user Id".to_string())
        );
    }

    #[test]
    fn test_login_no_match_is_authorisation_not_server() {
        assert_eq!(
            classify(StoreError::NotFound, Context::Login),
            UserError::Authorisation("Wrong email or password".to_string())
        );
    }

    #[test]
    fn test_unrecognized_signal_is_server_error_with_opaque_detail() {
        let err = classify(StoreError::Backend("socket hangup".to_string()), Context::Login);
        assert_eq!(
            err,
            UserError::Server("Server error: socket hangup".to_string())
        );

        // A validation signal means nothing during lookup
        let err = classify(StoreError::Validation("x".to_string()), Context::LookupById);
        assert!(matches!(err, UserError::Server(_)));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::Validation("m".into()), StatusCode::BAD_REQUEST),
            (UserError::Cast("m".into()), StatusCode::BAD_REQUEST),
            (UserError::NotFound("m".into()), StatusCode::NOT_FOUND),
            (UserError::Authorisation("m".into()), StatusCode::UNAUTHORIZED),
            (UserError::forbidden(), StatusCode::FORBIDDEN),
            (UserError::server("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
