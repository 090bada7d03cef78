use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token time-to-live: 7 days.
pub const SESSION_TOKEN_TTL: i64 = 604800;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwt";

/// Claims carried inside a session token.
///
/// The user id is the only application claim; validity is entirely
/// determined by signature and expiry at verification time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Stateless JWT session authentication.
///
/// Signs a user id into a time-bounded HS256 token and verifies incoming
/// tokens against the same process-wide secret. No server-side session
/// state: there is nothing to store and nothing to revoke.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new auth instance from the loaded configuration.
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create a session token (7 days) for the given user.
    pub fn create_session_token(&self, user_id: Uuid) -> eyre::Result<String> {
        self.create_token(user_id, SESSION_TOKEN_TTL)
    }

    /// Create a token with an explicit TTL. Kept separate so tests can mint
    /// already-expired tokens.
    pub(crate) fn create_token(&self, user_id: Uuid, ttl_seconds: i64) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token's signature and expiry and decode its claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Build the `Set-Cookie` value for a freshly issued session token.
///
/// Cookie lifetime is aligned with the token's own expiry. The `Secure`
/// attribute is dropped in development so plain-HTTP local setups work.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let secure_flag = if secure { " Secure;" } else { "" };
    format!(
        "{}={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, token, secure_flag, SESSION_TOKEN_TTL
    )
}
