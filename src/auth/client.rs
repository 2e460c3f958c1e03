//! Auth sub-client: login, registration, logout.

use crate::auth::{parse_login_token, LoginRequest, RegisterRequest, SessionState};
use crate::client::MarketClient;
use crate::error::{AuthError, HttpError, SdkError};
use crate::http::AuthMode;

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Auth<'a> {
    /// Exchange credentials for a bearer token and sign the session in.
    ///
    /// Rejected credentials surface as [`AuthError::LoginFailed`].
    pub async fn login(&self, identifier: &str, password: &str) -> Result<(), SdkError> {
        let request = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let url = self.client.http.url("/auth/login");
        let body = match self
            .client
            .http
            .post_text(&url, &request, AuthMode::Anonymous)
            .await
        {
            Ok(body) => body,
            Err(SdkError::Http(HttpError::Unauthorized)) => {
                return Err(AuthError::LoginFailed("Invalid credentials".to_string()).into());
            }
            Err(SdkError::Http(HttpError::BadRequest(body))) => {
                return Err(AuthError::LoginFailed(body).into());
            }
            Err(e) => return Err(e),
        };

        let token = parse_login_token(&body)
            .ok_or_else(|| AuthError::LoginFailed("Empty login response".to_string()))?;
        self.client.session().sign_in(token).await?;
        tracing::debug!("Signed in as {}", identifier);
        Ok(())
    }

    /// Create an account. Does not sign in.
    ///
    /// When the backend rejects individual fields the messages come back as
    /// [`SdkError::FieldErrors`], keyed by field name.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), SdkError> {
        let url = self.client.http.url("/auth/register");
        self.client
            .http
            .post_text(&url, request, AuthMode::Anonymous)
            .await
            .map_err(SdkError::with_field_errors)?;
        Ok(())
    }

    /// Drop the token locally. The backend keeps no session to end.
    pub async fn logout(&self) {
        self.client.session().teardown().await;
    }

    pub fn state(&self) -> SessionState {
        self.client.session().state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_signed_in()
    }
}
