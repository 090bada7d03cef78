//! JSON extractor with automatic validation using the validator crate.

use crate::errors::ErrorResponse;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate`
/// trait. Both an unparseable body and a failed validation reject with the
/// API's uniform 400 body; the field-level details are logged, not leaked.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

fn validation_rejection() -> Response {
    ErrorResponse::new("Validation error").into_response_with(StatusCode::BAD_REQUEST)
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("JSON extraction failed: {}", e.body_text());
            validation_rejection()
        })?;

        data.validate().map_err(|e| {
            tracing::debug!("Request validation failed: {:?}", e.field_errors());
            validation_rejection()
        })?;

        Ok(ValidatedJson(data))
    }
}
