//! # Card Marketplace SDK
//!
//! Client-side SDK for a trading card marketplace, usable on native and WASM
//! targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Shared newtypes, domain models, filter engine (always available, WASM-safe)
//! 2. **Auth**: `Session` lifecycle, token persistence, JWT expiry checks
//! 3. **HTTP API**: `MarketHttp` with bearer injection and multipart upload
//! 4. **High-Level Client**: `MarketClient` with nested sub-clients
//! 5. **Controllers**: App-owned page controllers: result caches, filter
//!    state, mutation reconciliation, notification polling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cardmarket_sdk::prelude::*;
//!
//! let client = MarketClient::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//! client.auth().login("ash", "pikachu").await?;
//!
//! let mut explore = client.explore_controller();
//! explore.load(&client).await?;
//! explore.edit_filters(|f| f.toggle_rarity(Rarity::HyperRare).with_sort("price-asc"));
//! explore.search(&client).await?;
//! for listing in explore.visible() {
//!     println!("{} {}", listing.title, listing.price);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network defaults.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: session, token storage, login/register.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with bearer-token injection.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `MarketClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Controllers ─────────────────────────────────────────────────────

/// Page controllers driven through the `MarketBackend` trait.
pub mod controller;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ListingId, PageRequest, PaginationMeta, DEFAULT_PAGE_SIZE};

    // Domain types: listing
    pub use crate::domain::listing::{
        CardCondition, CardType, DraftError, DraftField, DraftPurpose, FieldError, ImageUpload,
        Listing, ListingDraft, ListingPage, ListingStatus, ListingTabs, PagedResultCache, Rarity,
        Region, Tab, ValidatedDraft,
    };

    // Domain types: filter
    pub use crate::domain::filter::{
        apply_filters, FilterState, FilteringMode, PriceBounds, SearchScope, SortDirection,
        SortKey, SortOption,
    };

    // Domain types: wishlist, notification, user
    pub use crate::domain::notification::{Notification, NotificationInbox};
    pub use crate::domain::user::UserProfile;
    pub use crate::domain::wishlist::{Wishlist, WishlistGroup, WishlistItem};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL};

    // Auth
    pub use crate::auth::{
        FileTokenStore, MemoryTokenStore, RegisterRequest, Session, SessionState, TokenStore,
    };

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AuthClient, ListingsClient, MarketClient, MarketClientBuilder, NotificationsClient,
        UsersClient,
    };
    #[cfg(feature = "http")]
    pub use crate::domain::wishlist::client::WishlistClient;

    // Controllers
    pub use crate::controller::{
        ExploreController, FetchKind, MarketBackend, MutationKind, MutationOutcome, MutationPhase,
        MutationState, NotificationPoller, ProfileController, WishlistController, WishlistToggle,
    };
}
