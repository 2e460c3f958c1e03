//! Marketplace browsing: one result cache, the filter panel, paging and the
//! per-listing wishlist toggle.

use super::backend::MarketBackend;
use super::mutation::{
    MutationGuard, MutationKind, MutationOutcome, MutationState, PendingConfirmation,
};
use super::{run_fetch, FetchKind, FetchTracker, PreparedFetch};
use crate::domain::filter::{to_search_request, FilterState, FilteringMode, PriceBounds, SearchScope};
use crate::domain::listing::{Listing, ListingPage, PagedResultCache};
use crate::error::SdkError;
use crate::shared::{ListingId, PageRequest, PaginationMeta, DEFAULT_PAGE_SIZE};

/// What a wishlist toggle did.
#[derive(Debug)]
pub enum WishlistToggle {
    Added(MutationOutcome),
    /// The listing is already saved; removal waits for
    /// [`ExploreController::confirm_wishlist_removal`].
    ConfirmationRequired,
}

/// Controller for the explore page.
///
/// Filter edits only change [`filters`](Self::filters) and the locally
/// derived [`visible`](Self::visible) list. The backend is asked again only
/// on an explicit [`search`](Self::search), [`reset`](Self::reset), paging,
/// or after a mutation.
///
/// In [`FilteringMode::Client`] every fetch loads the whole collection, so
/// [`pagination`](Self::pagination) reports a single page.
#[derive(Debug)]
pub struct ExploreController {
    mode: FilteringMode,
    page_size: u32,
    scope: SearchScope,
    filters: FilterState,
    applied: FilterState,
    cache: PagedResultCache,
    fetch: FetchTracker,
    mutation: MutationState,
    pending_removal: PendingConfirmation<ListingId>,
}

impl Default for ExploreController {
    fn default() -> Self {
        Self::new(FilteringMode::default(), DEFAULT_PAGE_SIZE)
    }
}

impl ExploreController {
    pub fn new(mode: FilteringMode, page_size: u32) -> Self {
        let filters = FilterState::reset(mode);
        Self {
            mode,
            page_size: page_size.max(1),
            scope: SearchScope::explore(),
            applied: filters.clone(),
            filters,
            cache: PagedResultCache::new(page_size),
            fetch: FetchTracker::default(),
            mutation: MutationState::default(),
            pending_removal: PendingConfirmation::default(),
        }
    }

    /// Search a different slice of the marketplace (e.g. one seller's page).
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    // ── Filters ──────────────────────────────────────────────────────────

    pub fn mode(&self) -> FilteringMode {
        self.mode
    }

    /// Filters as currently edited.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Filters the cached page was fetched with. Only a fetch that lands
    /// changes them.
    pub fn applied_filters(&self) -> &FilterState {
        &self.applied
    }

    pub fn has_unapplied_changes(&self) -> bool {
        self.filters != self.applied
    }

    /// Replace the edited filters. Never touches the network.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Derive new edited filters from the current ones.
    pub fn edit_filters(&mut self, edit: impl FnOnce(&FilterState) -> FilterState) {
        self.filters = edit(&self.filters);
    }

    // ── View ─────────────────────────────────────────────────────────────

    /// The listings to render.
    ///
    /// With server filtering and no pending edits this is the fetched page
    /// as is. Otherwise it is the page filtered locally with the edited
    /// filters.
    pub fn visible(&self) -> Vec<Listing> {
        if self.mode == FilteringMode::Server && !self.has_unapplied_changes() {
            return self.cache.listings().to_vec();
        }
        self.cache
            .apply_local_filter(&self.filters, PriceBounds::for_mode(self.mode))
    }

    pub fn cache(&self) -> &PagedResultCache {
        &self.cache
    }

    pub fn pagination(&self) -> &PaginationMeta {
        self.cache.pagination()
    }

    /// A full-page load is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.fetch.kind(), Some(FetchKind::Load))
    }

    /// A filter search is in flight.
    pub fn is_searching(&self) -> bool {
        matches!(self.fetch.kind(), Some(FetchKind::Search))
    }

    pub fn mutation(&self) -> &MutationState {
        &self.mutation
    }

    // ── Fetching ─────────────────────────────────────────────────────────

    /// Issue a ticket and build the request for a fetch.
    ///
    /// Pair with [`complete_fetch`](Self::complete_fetch). Only the most
    /// recently prepared fetch can change the cache.
    ///
    /// A [`FetchKind::Search`] fetch carries the edited filters; every other
    /// kind refetches with the applied ones.
    pub fn prepare_fetch(&mut self, kind: FetchKind, page: PageRequest) -> PreparedFetch {
        let ticket = self.cache.begin_fetch();
        self.fetch.start(ticket, kind);
        let filters = match kind {
            FetchKind::Search => self.filters.clone(),
            _ => self.applied.clone(),
        };
        let request = match self.mode {
            FilteringMode::Server => to_search_request(&filters, &self.scope, page),
            FilteringMode::Client => to_search_request(
                &FilterState::default(),
                &self.scope,
                PageRequest::first(page.size),
            ),
        };
        PreparedFetch {
            ticket,
            kind,
            request,
            filters,
        }
    }

    /// Apply the result of a prepared fetch.
    ///
    /// Returns `Ok(false)` when a newer fetch superseded this one; its
    /// result (success or failure) is discarded. Errors leave the cache and
    /// the applied filters untouched.
    pub fn complete_fetch(
        &mut self,
        prepared: &PreparedFetch,
        result: Result<ListingPage, SdkError>,
    ) -> Result<bool, SdkError> {
        if !self.fetch.finish(prepared.ticket) {
            tracing::debug!("Ignoring superseded {:?} fetch", prepared.kind);
            return Ok(false);
        }
        let page = result?;
        let applied = self.cache.apply_fetch(prepared.ticket, page);
        if applied {
            self.applied = prepared.filters.clone();
        }
        Ok(applied)
    }

    async fn fetch<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        kind: FetchKind,
        page: PageRequest,
    ) -> Result<bool, SdkError> {
        let prepared = self.prepare_fetch(kind, page);
        let result = run_fetch(backend, &prepared, self.mode).await;
        self.complete_fetch(&prepared, result)
    }

    /// Initial load with the applied filters.
    pub async fn load<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        self.fetch(backend, FetchKind::Load, PageRequest::first(self.page_size))
            .await
            .map(|_| ())
    }

    /// Fetch the first page for the edited filters. They become the
    /// applied filters only if the fetch succeeds.
    pub async fn search<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        self.fetch(backend, FetchKind::Search, PageRequest::first(self.page_size))
            .await
            .map(|_| ())
    }

    /// Back to the reset filters, then fetch the first page.
    pub async fn reset<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        self.filters = FilterState::reset(self.mode);
        self.fetch(backend, FetchKind::Search, PageRequest::first(self.page_size))
            .await
            .map(|_| ())
    }

    /// Refetch the current page.
    pub async fn refresh<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        let page = self.current_request();
        self.fetch(backend, FetchKind::Refresh, page).await.map(|_| ())
    }

    // ── Paging ───────────────────────────────────────────────────────────

    fn current_request(&self) -> PageRequest {
        PageRequest::new(self.cache.pagination().current_page, self.page_size)
    }

    /// Returns `Ok(false)` when already on the last page.
    pub async fn next_page<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<bool, SdkError> {
        match self.cache.pagination().next_request() {
            Some(_) => self.go_to_page(backend, self.cache.pagination().current_page + 1).await,
            None => Ok(false),
        }
    }

    /// Returns `Ok(false)` when already on the first page.
    pub async fn prev_page<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<bool, SdkError> {
        match self.cache.pagination().prev_request() {
            Some(_) => self.go_to_page(backend, self.cache.pagination().current_page - 1).await,
            None => Ok(false),
        }
    }

    /// Fetch page `page` (zero-based). Out-of-range pages return `Ok(false)`.
    pub async fn go_to_page<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        page: u32,
    ) -> Result<bool, SdkError> {
        if !page_in_range(self.cache.pagination(), page) {
            return Ok(false);
        }
        self.fetch(backend, FetchKind::Page, PageRequest::new(page, self.page_size))
            .await
    }

    // ── Wishlist ─────────────────────────────────────────────────────────

    /// Add when not saved; otherwise open the removal confirmation.
    pub async fn toggle_wishlist<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: &ListingId,
    ) -> Result<WishlistToggle, SdkError> {
        let saved = self.cache.get(id).is_some_and(|l| l.in_cart);
        if saved {
            self.request_wishlist_removal(id.clone());
            Ok(WishlistToggle::ConfirmationRequired)
        } else {
            self.add_to_wishlist(backend, id).await.map(WishlistToggle::Added)
        }
    }

    pub async fn add_to_wishlist<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: &ListingId,
    ) -> Result<MutationOutcome, SdkError> {
        let guard = self.mutation.begin(MutationKind::AddToWishlist)?;
        backend.add_to_wishlist(id).await?;
        self.cache.update(id, |l| l.in_cart = true);
        Ok(self.refresh_after_mutation(backend, guard).await)
    }

    pub fn request_wishlist_removal(&mut self, id: ListingId) {
        self.pending_removal.request(id);
    }

    pub fn cancel_wishlist_removal(&mut self) {
        self.pending_removal.cancel();
    }

    pub fn pending_wishlist_removal(&self) -> Option<&ListingId> {
        self.pending_removal.get()
    }

    pub async fn confirm_wishlist_removal<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<MutationOutcome, SdkError> {
        let guard = self.mutation.begin(MutationKind::RemoveFromWishlist)?;
        let id = self.pending_removal.take()?;
        backend.remove_from_wishlist(&id).await?;
        self.cache.update(&id, |l| l.in_cart = false);
        Ok(self.refresh_after_mutation(backend, guard).await)
    }

    async fn refresh_after_mutation<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        guard: MutationGuard,
    ) -> MutationOutcome {
        guard.refreshing();
        MutationOutcome::from(self.refresh(backend).await)
    }
}

fn page_in_range(meta: &PaginationMeta, page: u32) -> bool {
    page < meta.total_pages || (page == 0 && meta.total_pages == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range() {
        let meta = PaginationMeta::new(41, 0, 20);
        assert!(page_in_range(&meta, 2));
        assert!(!page_in_range(&meta, 3));
        assert!(page_in_range(&PaginationMeta::empty(20), 0));
    }

    #[test]
    fn test_client_mode_requests_are_unfiltered() {
        let mut explore = ExploreController::new(FilteringMode::Client, 10);
        explore.edit_filters(|f| f.with_search_query("mew").with_sort("price-asc"));
        let prepared = explore.prepare_fetch(FetchKind::Search, PageRequest::new(3, 10));
        assert_eq!(prepared.request.listing_title, None);
        assert_eq!(prepared.request.sort_by, None);
        assert_eq!(prepared.request.page, 0);
        assert_eq!(prepared.filters.search_query(), "mew");
        assert!(explore.is_searching());
    }

    #[test]
    fn test_failed_search_keeps_applied_filters() {
        let mut explore = ExploreController::default();
        explore.edit_filters(|f| f.with_max_price("100"));
        let prepared = explore.prepare_fetch(FetchKind::Search, PageRequest::first(20));
        let result = explore.complete_fetch(&prepared, Err(crate::error::HttpError::Timeout.into()));
        assert!(result.is_err());
        assert!(explore.has_unapplied_changes());
        assert_eq!(explore.applied_filters(), &FilterState::reset(FilteringMode::Server));
        assert!(!explore.is_searching());
    }

    #[test]
    fn test_filter_edits_do_not_issue_fetches() {
        let mut explore = ExploreController::default();
        explore.edit_filters(|f| f.with_search_query("pika"));
        assert!(explore.has_unapplied_changes());
        assert!(!explore.is_loading());
        assert!(!explore.is_searching());
    }
}
