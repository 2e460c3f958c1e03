//! Listings sub-client: search, details, create, edit, delete, mark sold.

use crate::client::MarketClient;
use crate::domain::listing::wire::{ListingResponse, ListingSearchRequest, ListingsPageResponse};
use crate::domain::listing::{Listing, ListingPage, ValidatedDraft};
use crate::error::SdkError;
use crate::http::AuthMode;
use crate::shared::ListingId;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

pub struct Listings<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Listings<'a> {
    pub async fn search(&self, request: &ListingSearchRequest) -> Result<ListingPage, SdkError> {
        let url = self.client.http.url("/listing/get-all-listing");
        let resp: ListingsPageResponse =
            self.client.http.post(&url, request, AuthMode::Bearer).await?;
        Ok(ListingPage::from(resp))
    }

    pub async fn get(&self, id: &ListingId) -> Result<Listing, SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/listing/get-listing-details/{}", id.path_segment()));
        let resp: ListingResponse = self.client.http.get(&url, AuthMode::Bearer).await?;
        Listing::try_from(resp).map_err(|e| SdkError::Validation(e.to_string()))
    }

    /// Create a listing. The backend only echoes an id on some deployments.
    /// Fields it rejects come back as [`SdkError::FieldErrors`].
    pub async fn create(&self, draft: &ValidatedDraft) -> Result<Option<ListingId>, SdkError> {
        let url = self.client.http.url("/listing/create-listing");
        let body = self
            .client
            .http
            .send_multipart(Method::POST, &url, listing_form(draft)?, AuthMode::Bearer)
            .await
            .map_err(SdkError::with_field_errors)?;
        Ok(parse_created_id(&body))
    }

    pub async fn update(&self, id: &ListingId, draft: &ValidatedDraft) -> Result<(), SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/listing/update-listing/{}", id.path_segment()));
        self.client
            .http
            .send_multipart(Method::PUT, &url, listing_form(draft)?, AuthMode::Bearer)
            .await
            .map_err(SdkError::with_field_errors)?;
        Ok(())
    }

    pub async fn delete(&self, id: &ListingId) -> Result<(), SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/listing/delete-listing/{}", id.path_segment()));
        self.client
            .http
            .send_empty(Method::DELETE, &url, AuthMode::Bearer)
            .await?;
        Ok(())
    }

    pub async fn mark_sold(&self, id: &ListingId) -> Result<(), SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/listing/update-listing-as-sold/{}", id.path_segment()));
        self.client
            .http
            .send_empty(Method::PUT, &url, AuthMode::Bearer)
            .await?;
        Ok(())
    }
}

/// Multipart body: a JSON `data` part followed by one `images` part per upload.
fn listing_form(draft: &ValidatedDraft) -> Result<Form, SdkError> {
    let data = serde_json::to_string(&draft.metadata())?;
    let mut form = Form::new().part(
        "data",
        Part::text(data)
            .mime_str("application/json")
            .map_err(crate::error::HttpError::from)?,
    );
    for upload in &draft.uploads {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(crate::error::HttpError::from)?;
        form = form.part("images", part);
    }
    Ok(form)
}

/// Pull a listing id out of a create response, if it carries one.
///
/// Accepts `{"id": "..."}` or a body that is just the id.
pub(crate) fn parse_created_id(body: &str) -> Option<ListingId> {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(id) = value.get("id").and_then(|v| v.as_str()) {
            return Some(ListingId::from(id));
        }
    }
    uuid::Uuid::parse_str(trimmed.trim_matches('"'))
        .ok()
        .map(ListingId::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_created_id() {
        assert_eq!(
            parse_created_id(r#"{"id":"abc"}"#),
            Some(ListingId::from("abc"))
        );
        let uuid = "0b7e2a6c-1111-4c4c-9c9c-000000000001";
        assert_eq!(parse_created_id(uuid), Some(ListingId::from(uuid)));
        assert_eq!(parse_created_id("Listing created successfully"), None);
    }
}
