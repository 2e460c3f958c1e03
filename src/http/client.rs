//! Low-level HTTP client: `MarketHttp`.
//!
//! One helper per verb. Bearer tokens come from the shared [`Session`]; a
//! rejected token tears the session down. Requests are sent exactly once.

use crate::auth::Session;
use crate::error::{HttpError, SdkError};

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach the token; fail with `NotAuthenticated` when there is none.
    Bearer,
    /// Send without credentials (login, register).
    Anonymous,
}

/// Low-level HTTP client for the marketplace REST API.
#[derive(Clone)]
pub struct MarketHttp {
    base_url: String,
    client: Client,
    session: Arc<Session>,
}

impl MarketHttp {
    pub fn new(base_url: &str, session: Arc<Session>) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(crate::network::DEFAULT_REQUEST_TIMEOUT)
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Absolute URL for an API path such as `/listing/get-all-listing`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── JSON helpers ─────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        auth: AuthMode,
    ) -> Result<T, SdkError> {
        let body = self.send(self.client.get(url), auth).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        auth: AuthMode,
    ) -> Result<T, SdkError> {
        let text = self.post_text(url, body, auth).await?;
        Ok(serde_json::from_str(&text)?)
    }

    // ── Text helpers (endpoints that answer with a plain message) ────────

    pub(crate) async fn post_text<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        auth: AuthMode,
    ) -> Result<String, SdkError> {
        self.send(self.client.post(url).json(body), auth).await
    }

    pub(crate) async fn send_empty(
        &self,
        method: Method,
        url: &str,
        auth: AuthMode,
    ) -> Result<String, SdkError> {
        self.send(self.client.request(method, url), auth).await
    }

    pub(crate) async fn send_multipart(
        &self,
        method: Method,
        url: &str,
        form: Form,
        auth: AuthMode,
    ) -> Result<String, SdkError> {
        self.send(self.client.request(method, url).multipart(form), auth)
            .await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn send(&self, mut req: RequestBuilder, auth: AuthMode) -> Result<String, SdkError> {
        if auth == AuthMode::Bearer {
            let token = self.session.require_token().await?;
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(map_transport_error)?;
        let status = resp.status();
        let url = resp.url().to_string();
        let body = resp.text().await.map_err(map_transport_error)?;

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "{}", url);
            return Ok(body);
        }

        tracing::debug!(status = status.as_u16(), "Request to {} failed", url);
        let err = status_error(status.as_u16(), body);
        if matches!(err, HttpError::Unauthorized) && auth == AuthMode::Bearer {
            tracing::warn!("Backend rejected the session token; signing out");
            self.session.teardown().await;
        }
        Err(err.into())
    }
}

fn map_transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

/// Map a non-success status and its body to an [`HttpError`].
pub(crate) fn status_error(status: u16, body: String) -> HttpError {
    match status {
        401 | 403 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

impl std::fmt::Debug for MarketHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketHttp")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(status_error(401, String::new()), HttpError::Unauthorized));
        assert!(matches!(status_error(403, String::new()), HttpError::Unauthorized));
        assert!(matches!(status_error(404, "gone".into()), HttpError::NotFound(b) if b == "gone"));
        assert!(matches!(status_error(422, String::new()), HttpError::BadRequest(_)));
        assert!(matches!(
            status_error(502, String::new()),
            HttpError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = MarketHttp::new("http://localhost:8080/", Arc::new(Session::in_memory())).unwrap();
        assert_eq!(http.base_url(), "http://localhost:8080");
        assert_eq!(http.url("/cart/get-cart-items"), "http://localhost:8080/cart/get-cart-items");
    }

    #[tokio::test]
    async fn test_bearer_request_without_token_fails_before_sending() {
        let http = MarketHttp::new("http://127.0.0.1:9", Arc::new(Session::in_memory())).unwrap();
        let err = http
            .send_empty(Method::GET, &http.url("/user/get-details"), AuthMode::Bearer)
            .await
            .unwrap_err();
        assert!(err.requires_login());
    }
}
