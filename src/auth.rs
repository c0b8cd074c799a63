//! Request authentication.
//!
//! Handlers that need a caller identity take an [`AuthUser`] argument. The
//! extractor reads a JWT from the `auth_token` cookie, falling back to an
//! `Authorization: Bearer` header, and verifies it with the service's
//! [`TokenVerifier`].

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::error::BookingError;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Claims carried in an auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user identifier.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// Issues and verifies HS256 tokens with a shared secret.
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a verifier for tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Signs a token for `user_id` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Internal`] if signing fails.
    pub fn issue(&self, user_id: &str, ttl: chrono::Duration) -> Result<String, BookingError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| BookingError::Internal(format!("token signing failed: {e}")))
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] if the token is malformed,
    /// has a bad signature, or has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, BookingError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => BookingError::Unauthorized("token expired".to_string()),
                _ => BookingError::Unauthorized("invalid token".to_string()),
            })
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Identifier of the authenticated user.
    pub user_id: String,
}

/// Finds the raw token in the cookie header or a bearer authorization header.
fn token_from_parts(parts: &Parts) -> Option<&str> {
    let from_cookie = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then_some(value)
        });

    from_cookie.or_else(|| {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BookingError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let Some(token) = token_from_parts(parts) else {
            tracing::debug!(uri = %parts.uri, "missing auth token");
            return Err(BookingError::Unauthorized("missing auth token".to_string()));
        };

        let claims = state.tokens.verify(token).inspect_err(|e| {
            tracing::warn!(uri = %parts.uri, error = %e, "auth token rejected");
        })?;

        let user = AuthUser {
            user_id: claims.user_id,
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
