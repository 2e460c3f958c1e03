//! The seam between view controllers and the marketplace API.

use crate::domain::listing::wire::ListingSearchRequest;
use crate::domain::listing::{Listing, ListingPage, ValidatedDraft};
use crate::domain::notification::Notification;
use crate::domain::wishlist::Wishlist;
use crate::error::SdkError;
use crate::shared::ListingId;
use async_trait::async_trait;

/// Every backend call a controller makes.
///
/// Implemented by [`MarketClient`](crate::client::MarketClient); tests use
/// in-memory fakes. Futures are not `Send` so the same trait works on WASM.
#[async_trait(?Send)]
pub trait MarketBackend {
    async fn search_listings(&self, request: &ListingSearchRequest) -> Result<ListingPage, SdkError>;

    async fn listing_details(&self, id: &ListingId) -> Result<Listing, SdkError>;

    /// Returns the new listing's id when the backend reports one.
    async fn create_listing(&self, draft: &ValidatedDraft) -> Result<Option<ListingId>, SdkError>;

    async fn update_listing(&self, id: &ListingId, draft: &ValidatedDraft) -> Result<(), SdkError>;

    async fn delete_listing(&self, id: &ListingId) -> Result<(), SdkError>;

    async fn mark_listing_sold(&self, id: &ListingId) -> Result<(), SdkError>;

    async fn add_to_wishlist(&self, id: &ListingId) -> Result<(), SdkError>;

    async fn remove_from_wishlist(&self, id: &ListingId) -> Result<(), SdkError>;

    async fn wishlist(&self) -> Result<Wishlist, SdkError>;

    async fn notifications(&self) -> Result<Vec<Notification>, SdkError>;

    async fn mark_notification_read(&self, id: i64) -> Result<(), SdkError>;
}
