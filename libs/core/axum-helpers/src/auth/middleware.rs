use super::jwt::{JwtAuth, SESSION_COOKIE};
use crate::errors::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

/// Extract the session token from the Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to the session cookie
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| extract_cookie_value(cookies, SESSION_COOKIE))
        })
}

/// Extract a cookie value by name from a `Cookie` header
pub fn extract_cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
        if parts.len() == 2 && parts[0] == name {
            Some(parts[1].to_string())
        } else {
            None
        }
    })
}

fn forbidden() -> Response {
    ErrorResponse::new("Authorisation error.").into_response_with(StatusCode::FORBIDDEN)
}

/// Session authentication middleware.
///
/// Extracts the token from the `jwt` cookie (or a bearer header), verifies
/// signature and expiry, and inserts the decoded [`Claims`] into request
/// extensions before any handler runs. A missing token is treated as a
/// verification failure like any other: every failure terminates the
/// request with 403 and the same body.
///
/// [`Claims`]: super::jwt::Claims
pub async fn session_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No session token in Authorization header or cookie");
            return Err(forbidden());
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("Session token verification failed: {}", e);
            return Err(forbidden());
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
