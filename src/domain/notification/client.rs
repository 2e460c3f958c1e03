//! Notifications sub-client: list and mark read.

use crate::client::MarketClient;
use crate::domain::notification::wire::NotificationResponse;
use crate::domain::notification::Notification;
use crate::error::SdkError;
use crate::http::AuthMode;
use reqwest::Method;

pub struct Notifications<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Notifications<'a> {
    pub async fn all(&self) -> Result<Vec<Notification>, SdkError> {
        let url = self.client.http.url("/notification/get-all-notifications");
        let resp: Vec<NotificationResponse> = self.client.http.get(&url, AuthMode::Bearer).await?;
        Ok(resp.into_iter().map(Notification::from).collect())
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/notification/mark-as-read/{}", id));
        self.client
            .http
            .send_empty(Method::PUT, &url, AuthMode::Bearer)
            .await?;
        Ok(())
    }
}
