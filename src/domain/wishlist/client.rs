//! Wishlist sub-client: add, remove, list.

use crate::client::MarketClient;
use crate::domain::wishlist::wire::CartGroupResponse;
use crate::domain::wishlist::Wishlist;
use crate::error::SdkError;
use crate::http::AuthMode;
use crate::shared::ListingId;
use reqwest::Method;

pub struct WishlistClient<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> WishlistClient<'a> {
    pub async fn add(&self, id: &ListingId) -> Result<(), SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/cart/add-to-cart/{}", id.path_segment()));
        self.client
            .http
            .send_empty(Method::POST, &url, AuthMode::Bearer)
            .await?;
        Ok(())
    }

    pub async fn remove(&self, id: &ListingId) -> Result<(), SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/cart/delete-from-cart/{}", id.path_segment()));
        self.client
            .http
            .send_empty(Method::DELETE, &url, AuthMode::Bearer)
            .await?;
        Ok(())
    }

    pub async fn get(&self) -> Result<Wishlist, SdkError> {
        let url = self.client.http.url("/cart/get-cart-items");
        let groups: Vec<CartGroupResponse> =
            self.client.http.get(&url, AuthMode::Bearer).await?;
        Ok(Wishlist::from(groups))
    }
}
