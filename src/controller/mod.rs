//! View controllers: app-owned objects that own result caches and drive
//! them through a [`MarketBackend`].
//!
//! Controllers never spawn tasks. Every async method borrows the controller
//! mutably for the duration of one backend round trip. Apps that need to
//! issue overlapping fetches use the `prepare_fetch` / `complete_fetch`
//! pair directly; fetch tickets make sure the latest one wins.

pub mod backend;
pub mod explore;
pub mod mutation;
pub mod notifications;
pub mod profile;
pub mod wishlist;

use crate::domain::filter::{FilterState, FilteringMode};
use crate::domain::listing::wire::ListingSearchRequest;
use crate::domain::listing::{FetchTicket, ListingPage};
use crate::error::SdkError;
use crate::shared::PaginationMeta;

pub use backend::MarketBackend;
pub use explore::{ExploreController, WishlistToggle};
pub use mutation::{MutationKind, MutationOutcome, MutationPhase, MutationState, PendingConfirmation};
pub use notifications::{NotificationPoller, NotificationStream, PollResult};
pub use profile::ProfileController;
pub use wishlist::WishlistController;

/// Why a fetch was issued; drives the loading indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// Whole-page load.
    Load,
    /// Explicit filter search or reset.
    Search,
    /// Pagination.
    Page,
    /// Follow-up after a mutation.
    Refresh,
}

/// A fetch that has been issued but not applied yet.
#[derive(Debug, Clone)]
pub struct PreparedFetch {
    pub ticket: FetchTicket,
    pub kind: FetchKind,
    pub request: ListingSearchRequest,
    /// Becomes the applied filter state once this fetch lands.
    pub filters: FilterState,
}

/// Run a prepared fetch against `backend`.
///
/// Server mode asks for the one requested page. Client mode walks every
/// page and returns the whole collection as a single page, since local
/// filtering only makes sense over everything.
pub async fn run_fetch<B: MarketBackend + ?Sized>(
    backend: &B,
    prepared: &PreparedFetch,
    mode: FilteringMode,
) -> Result<ListingPage, SdkError> {
    let first = backend.search_listings(&prepared.request).await?;
    if mode == FilteringMode::Server {
        return Ok(first);
    }

    let total_pages = first.pagination.total_pages;
    let mut listings = first.listings;
    let mut request = prepared.request.clone();
    for page in (request.page + 1)..total_pages {
        request.page = page;
        listings.extend(backend.search_listings(&request).await?.listings);
    }
    tracing::debug!("Fetched {} listings over {} pages", listings.len(), total_pages);

    let count = u32::try_from(listings.len()).unwrap_or(u32::MAX);
    Ok(ListingPage {
        pagination: PaginationMeta::new(u64::from(count), 0, count),
        listings,
    })
}

/// Tracks the latest fetch issued for one cache.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FetchTracker {
    in_flight: Option<(FetchTicket, FetchKind)>,
}

impl FetchTracker {
    pub(crate) fn start(&mut self, ticket: FetchTicket, kind: FetchKind) {
        self.in_flight = Some((ticket, kind));
    }

    /// Clears the in-flight marker if `ticket` is the latest one.
    /// Returns whether it was.
    pub(crate) fn finish(&mut self, ticket: FetchTicket) -> bool {
        match self.in_flight {
            Some((current, _)) if current == ticket => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn kind(&self) -> Option<FetchKind> {
        self.in_flight.map(|(_, kind)| kind)
    }
}
