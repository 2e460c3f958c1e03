//! Authentication: credentials, session lifecycle, token inspection.
//!
//! ## Session model
//!
//! The bearer token lives in a [`Session`], which is created by the app and
//! handed to the client builder. The session is hydrated from a pluggable
//! [`TokenStore`] at startup and torn down on logout or whenever the backend
//! rejects the token. Subscribers are told about every transition through
//! [`Session::subscribe`] so the app can route back to its login screen.
//!
//! Expired tokens are never sent: the `exp` claim of the JWT payload is
//! checked locally before each authenticated request.

#[cfg(feature = "http")]
pub mod client;
pub mod session;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::listing::Region;

pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionState, TokenStore};

// ============================================================================
// Wire types
// ============================================================================

/// Body of `POST /auth/login`. `identifier` is a username or email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub region: Region,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenEnvelope {
    token: String,
}

/// Extract the token from a login response body.
///
/// Accepts either `{"token": "..."}` or the bare token as plain text.
pub fn parse_login_token(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(envelope) = serde_json::from_str::<TokenEnvelope>(trimmed) {
        return Some(envelope.token).filter(|t| !t.is_empty());
    }
    // A JSON string literal, e.g. "\"eyJ...\"".
    if let Ok(token) = serde_json::from_str::<String>(trimmed) {
        return Some(token).filter(|t| !t.is_empty());
    }
    Some(trimmed.to_string())
}

// ============================================================================
// JWT inspection
// ============================================================================

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
    sub: Option<String>,
}

fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Expiry of a JWT, if it carries a readable `exp` claim.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let exp = decode_claims(token)?.exp?;
    Utc.timestamp_opt(exp, 0).single()
}

/// Subject (username) of a JWT, if readable.
pub fn token_subject(token: &str) -> Option<String> {
    decode_claims(token)?.sub
}

/// Whether the token is past its `exp` claim at `now`.
///
/// Tokens without a readable expiry are treated as valid; the backend is the
/// final judge and a 401 tears the session down anyway.
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    token_expiry(token).is_some_and(|exp| exp <= now)
}
