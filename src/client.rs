//! High-level client: `MarketClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the controller factories, and the
//! [`MarketBackend`] implementation the controllers run against.

use crate::auth::client::Auth;
use crate::auth::Session;
use crate::controller::{
    ExploreController, MarketBackend, NotificationPoller, ProfileController, WishlistController,
};
use crate::domain::filter::FilteringMode;
use crate::domain::listing::client::Listings;
use crate::domain::listing::wire::ListingSearchRequest;
use crate::domain::listing::{Listing, ListingPage, ValidatedDraft};
use crate::domain::notification::client::Notifications;
use crate::domain::notification::Notification;
use crate::domain::user::client::Users;
use crate::domain::wishlist::client::WishlistClient;
use crate::domain::wishlist::Wishlist;
use crate::error::SdkError;
use crate::http::MarketHttp;
use crate::shared::{ListingId, DEFAULT_PAGE_SIZE};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::listing::client::Listings as ListingsClient;
pub use crate::domain::notification::client::Notifications as NotificationsClient;
pub use crate::domain::user::client::Users as UsersClient;

/// The primary entry point for the marketplace SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.listings()`, `client.wishlist()`, etc.
#[derive(Clone)]
pub struct MarketClient {
    pub(crate) http: MarketHttp,
    filtering_mode: FilteringMode,
    page_size: u32,
    poll_interval: Duration,
}

impl MarketClient {
    pub fn builder() -> MarketClientBuilder {
        MarketClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn listings(&self) -> Listings<'_> {
        Listings { client: self }
    }

    pub fn wishlist(&self) -> WishlistClient<'_> {
        WishlistClient { client: self }
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications { client: self }
    }

    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }

    pub fn session(&self) -> &Arc<Session> {
        self.http.session()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn filtering_mode(&self) -> FilteringMode {
        self.filtering_mode
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // ── Controller factories ─────────────────────────────────────────────
    //
    // Controllers are not embedded in the client: their lifetime belongs to
    // the view that shows them.

    pub fn explore_controller(&self) -> ExploreController {
        ExploreController::new(self.filtering_mode, self.page_size)
    }

    pub fn profile_controller(&self, username: impl Into<String>) -> ProfileController {
        ProfileController::new(username, self.filtering_mode, self.page_size)
    }

    pub fn wishlist_controller(&self) -> WishlistController {
        WishlistController::new()
    }

    pub fn notification_poller(&self) -> NotificationPoller {
        NotificationPoller::new(self.poll_interval)
    }
}

#[async_trait(?Send)]
impl MarketBackend for MarketClient {
    async fn search_listings(&self, request: &ListingSearchRequest) -> Result<ListingPage, SdkError> {
        self.listings().search(request).await
    }

    async fn listing_details(&self, id: &ListingId) -> Result<Listing, SdkError> {
        self.listings().get(id).await
    }

    async fn create_listing(&self, draft: &ValidatedDraft) -> Result<Option<ListingId>, SdkError> {
        self.listings().create(draft).await
    }

    async fn update_listing(&self, id: &ListingId, draft: &ValidatedDraft) -> Result<(), SdkError> {
        self.listings().update(id, draft).await
    }

    async fn delete_listing(&self, id: &ListingId) -> Result<(), SdkError> {
        self.listings().delete(id).await
    }

    async fn mark_listing_sold(&self, id: &ListingId) -> Result<(), SdkError> {
        self.listings().mark_sold(id).await
    }

    async fn add_to_wishlist(&self, id: &ListingId) -> Result<(), SdkError> {
        self.wishlist().add(id).await
    }

    async fn remove_from_wishlist(&self, id: &ListingId) -> Result<(), SdkError> {
        self.wishlist().remove(id).await
    }

    async fn wishlist(&self) -> Result<Wishlist, SdkError> {
        self.wishlist().get().await
    }

    async fn notifications(&self) -> Result<Vec<Notification>, SdkError> {
        self.notifications().all().await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<(), SdkError> {
        self.notifications().mark_read(id).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketClientBuilder {
    base_url: String,
    filtering_mode: FilteringMode,
    page_size: u32,
    poll_interval: Duration,
    session: Option<Arc<Session>>,
}

impl Default for MarketClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            filtering_mode: FilteringMode::default(),
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval: crate::network::DEFAULT_POLL_INTERVAL,
            session: None,
        }
    }
}

impl MarketClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn filtering_mode(mut self, mode: FilteringMode) -> Self {
        self.filtering_mode = mode;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Share an existing session. Without one the client gets an in-memory
    /// session that starts signed out.
    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<MarketClient, SdkError> {
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(Session::in_memory()));
        Ok(MarketClient {
            http: MarketHttp::new(&self.base_url, session)?,
            filtering_mode: self.filtering_mode,
            page_size: self.page_size,
            poll_interval: self.poll_interval,
        })
    }
}
