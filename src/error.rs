//! Unified SDK error types.

use crate::domain::listing::draft::DraftError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Draft rejected: {0}")]
    Draft(#[from] DraftError),

    /// Per-field rejection reported by the server (register, create, edit).
    #[error("Rejected fields: {}", join_keys(.0))]
    FieldErrors(BTreeMap<String, String>),

    #[error("Another {0} is still in progress")]
    Busy(&'static str),

    #[error("Nothing is awaiting confirmation")]
    NoPendingConfirmation,

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

fn join_keys(fields: &BTreeMap<String, String>) -> String {
    fields.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl SdkError {
    /// Whether the user may reasonably re-initiate the same action.
    ///
    /// The SDK itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Http(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Turn a rejected form submission into per-field errors when the body
    /// is a field map; other errors pass through.
    pub fn with_field_errors(self) -> SdkError {
        match self {
            SdkError::Http(HttpError::BadRequest(body)) => {
                match serde_json::from_str::<BTreeMap<String, String>>(&body) {
                    Ok(fields) if !fields.is_empty() => SdkError::FieldErrors(fields),
                    _ => SdkError::Http(HttpError::BadRequest(body)),
                }
            }
            other => other,
        }
    }

    /// Whether the failure means the session is gone and the app should
    /// send the user back to login.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            SdkError::Http(HttpError::Unauthorized)
                | SdkError::Auth(AuthError::NotAuthenticated)
                | SdkError::Auth(AuthError::TokenExpired)
        )
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,
}

impl HttpError {
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::ServerError { .. } | HttpError::Timeout => true,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Token storage failed: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_requires_login() {
        let err = SdkError::from(HttpError::Unauthorized);
        assert!(err.requires_login());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_server_error_is_retryable() {
        let err = SdkError::from(HttpError::ServerError {
            status: 503,
            body: "down".to_string(),
        });
        assert!(err.is_retryable());
        assert!(!err.requires_login());
    }

    #[test]
    fn test_field_errors_display_lists_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "Email is invalid".to_string());
        fields.insert("username".to_string(), "Username taken".to_string());
        let err = SdkError::FieldErrors(fields);
        assert_eq!(err.to_string(), "Rejected fields: email, username");
    }

    #[test]
    fn test_with_field_errors() {
        let err = SdkError::from(HttpError::BadRequest(r#"{"price":"Must be positive"}"#.to_string()))
            .with_field_errors();
        match err {
            SdkError::FieldErrors(fields) => assert_eq!(fields["price"], "Must be positive"),
            other => panic!("unexpected {other:?}"),
        }

        let plain = SdkError::from(HttpError::BadRequest("Image too large".to_string()))
            .with_field_errors();
        assert!(matches!(plain, SdkError::Http(HttpError::BadRequest(_))));
        assert!(matches!(
            SdkError::from(HttpError::Unauthorized).with_field_errors(),
            SdkError::Http(HttpError::Unauthorized)
        ));
    }
}
