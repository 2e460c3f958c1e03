//! The seller's own listings: active/sold tabs, create/edit, and the
//! confirm-gated delete and mark-as-sold actions.

use super::backend::MarketBackend;
use super::mutation::{
    MutationGuard, MutationKind, MutationOutcome, MutationState, PendingConfirmation,
};
use super::{run_fetch, FetchKind, FetchTracker, PreparedFetch};
use crate::domain::filter::{to_search_request, FilterState, FilteringMode, PriceBounds, SearchScope};
use crate::domain::listing::{
    DraftPurpose, Listing, ListingDraft, ListingPage, ListingTabs, Tab, ValidatedDraft,
};
use crate::error::SdkError;
use crate::shared::{ListingId, PageRequest, DEFAULT_PAGE_SIZE};

/// Controller for the profile page.
///
/// Every accepted mutation patches the tabs and then refetches both of
/// them; the refetch is authoritative. Each tab remembers the filters its
/// last successful fetch used.
#[derive(Debug)]
pub struct ProfileController {
    username: String,
    mode: FilteringMode,
    page_size: u32,
    filters: FilterState,
    applied_active: FilterState,
    applied_sold: FilterState,
    tabs: ListingTabs,
    selected: Tab,
    active_fetch: FetchTracker,
    sold_fetch: FetchTracker,
    mutation: MutationState,
    pending_delete: PendingConfirmation<ListingId>,
    pending_sold: PendingConfirmation<ListingId>,
}

impl ProfileController {
    pub fn new(username: impl Into<String>, mode: FilteringMode, page_size: u32) -> Self {
        let filters = FilterState::reset(mode);
        Self {
            username: username.into(),
            mode,
            page_size: page_size.max(1),
            applied_active: filters.clone(),
            applied_sold: filters.clone(),
            filters,
            tabs: ListingTabs::new(page_size),
            selected: Tab::Active,
            active_fetch: FetchTracker::default(),
            sold_fetch: FetchTracker::default(),
            mutation: MutationState::default(),
            pending_delete: PendingConfirmation::default(),
            pending_sold: PendingConfirmation::default(),
        }
    }

    pub fn with_default_page_size(username: impl Into<String>, mode: FilteringMode) -> Self {
        Self::new(username, mode, DEFAULT_PAGE_SIZE)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // ── Filters ──────────────────────────────────────────────────────────

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Filters the cached page of `tab` was fetched with.
    pub fn applied_filters(&self, tab: Tab) -> &FilterState {
        match tab {
            Tab::Active => &self.applied_active,
            Tab::Sold => &self.applied_sold,
        }
    }

    fn applied_mut(&mut self, tab: Tab) -> &mut FilterState {
        match tab {
            Tab::Active => &mut self.applied_active,
            Tab::Sold => &mut self.applied_sold,
        }
    }

    /// The edited filters differ from what either tab shows.
    pub fn has_unapplied_changes(&self) -> bool {
        self.filters != self.applied_active || self.filters != self.applied_sold
    }

    /// Replace the edited filters. Never touches the network.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn edit_filters(&mut self, edit: impl FnOnce(&FilterState) -> FilterState) {
        self.filters = edit(&self.filters);
    }

    // ── View ─────────────────────────────────────────────────────────────

    pub fn selected_tab(&self) -> Tab {
        self.selected
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.selected = tab;
    }

    pub fn tabs(&self) -> &ListingTabs {
        &self.tabs
    }

    /// Listings to render for `tab`; see
    /// [`ExploreController::visible`](super::ExploreController::visible).
    pub fn visible(&self, tab: Tab) -> Vec<Listing> {
        let cache = self.tabs.cache(tab);
        if self.mode == FilteringMode::Server && self.filters == *self.applied_filters(tab) {
            return cache.listings().to_vec();
        }
        cache.apply_local_filter(&self.filters, PriceBounds::for_mode(self.mode))
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_kinds().any(|k| k == FetchKind::Load)
    }

    pub fn is_searching(&self) -> bool {
        self.fetch_kinds().any(|k| k == FetchKind::Search)
    }

    fn fetch_kinds(&self) -> impl Iterator<Item = FetchKind> {
        self.active_fetch.kind().into_iter().chain(self.sold_fetch.kind())
    }

    pub fn mutation(&self) -> &MutationState {
        &self.mutation
    }

    pub fn pending_delete(&self) -> Option<&ListingId> {
        self.pending_delete.get()
    }

    pub fn pending_mark_sold(&self) -> Option<&ListingId> {
        self.pending_sold.get()
    }

    // ── Fetching ─────────────────────────────────────────────────────────

    fn tracker(&mut self, tab: Tab) -> &mut FetchTracker {
        match tab {
            Tab::Active => &mut self.active_fetch,
            Tab::Sold => &mut self.sold_fetch,
        }
    }

    /// Issue a ticket for `tab`. Search fetches carry the edited filters,
    /// every other kind the ones the tab already shows.
    pub fn prepare_fetch(&mut self, tab: Tab, kind: FetchKind, page: PageRequest) -> PreparedFetch {
        let ticket = self.tabs.begin_fetch(tab);
        self.tracker(tab).start(ticket, kind);
        let filters = match kind {
            FetchKind::Search => self.filters.clone(),
            _ => self.applied_filters(tab).clone(),
        };
        let scope = SearchScope::seller(self.username.clone(), tab.status());
        let request = match self.mode {
            FilteringMode::Server => to_search_request(&filters, &scope, page),
            FilteringMode::Client => {
                to_search_request(&FilterState::default(), &scope, PageRequest::first(page.size))
            }
        };
        PreparedFetch {
            ticket,
            kind,
            request,
            filters,
        }
    }

    /// Apply a prepared fetch to `tab`. Superseded results are dropped with
    /// `Ok(false)`; errors leave both tabs and their applied filters
    /// untouched.
    pub fn complete_fetch(
        &mut self,
        tab: Tab,
        prepared: &PreparedFetch,
        result: Result<ListingPage, SdkError>,
    ) -> Result<bool, SdkError> {
        if !self.tracker(tab).finish(prepared.ticket) {
            tracing::debug!("Ignoring superseded {:?} fetch for {:?} tab", prepared.kind, tab);
            return Ok(false);
        }
        let page = result?;
        let applied = self.tabs.apply_fetch(tab, prepared.ticket, page);
        if applied {
            *self.applied_mut(tab) = prepared.filters.clone();
        }
        Ok(applied)
    }

    async fn fetch<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        tab: Tab,
        kind: FetchKind,
        page: PageRequest,
    ) -> Result<bool, SdkError> {
        let prepared = self.prepare_fetch(tab, kind, page);
        let result = run_fetch(backend, &prepared, self.mode).await;
        self.complete_fetch(tab, &prepared, result)
    }

    /// Fetch both tabs. Both are attempted; the first error is returned.
    async fn fetch_both<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        kind: FetchKind,
        active_page: PageRequest,
        sold_page: PageRequest,
    ) -> Result<(), SdkError> {
        let active = self.fetch(backend, Tab::Active, kind, active_page).await;
        let sold = self.fetch(backend, Tab::Sold, kind, sold_page).await;
        active?;
        sold?;
        Ok(())
    }

    pub async fn load<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        let first = PageRequest::first(self.page_size);
        self.fetch_both(backend, FetchKind::Load, first, first).await
    }

    /// Fetch both tabs with the edited filters. A tab whose fetch fails
    /// keeps its previous page and filters.
    pub async fn search<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        let first = PageRequest::first(self.page_size);
        self.fetch_both(backend, FetchKind::Search, first, first).await
    }

    pub async fn reset<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        self.filters = FilterState::reset(self.mode);
        let first = PageRequest::first(self.page_size);
        self.fetch_both(backend, FetchKind::Search, first, first).await
    }

    /// Refetch both tabs at their current pages.
    pub async fn refresh<B: MarketBackend + ?Sized>(&mut self, backend: &B) -> Result<(), SdkError> {
        let active = self.current_request(Tab::Active);
        let sold = self.current_request(Tab::Sold);
        self.fetch_both(backend, FetchKind::Refresh, active, sold).await
    }

    // ── Paging ───────────────────────────────────────────────────────────

    fn current_request(&self, tab: Tab) -> PageRequest {
        PageRequest::new(self.tabs.cache(tab).pagination().current_page, self.page_size)
    }

    pub async fn next_page<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        tab: Tab,
    ) -> Result<bool, SdkError> {
        let meta = *self.tabs.cache(tab).pagination();
        match meta.next_request() {
            Some(_) => self.go_to_page(backend, tab, meta.current_page + 1).await,
            None => Ok(false),
        }
    }

    pub async fn prev_page<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        tab: Tab,
    ) -> Result<bool, SdkError> {
        let meta = *self.tabs.cache(tab).pagination();
        match meta.prev_request() {
            Some(_) => self.go_to_page(backend, tab, meta.current_page - 1).await,
            None => Ok(false),
        }
    }

    pub async fn go_to_page<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        tab: Tab,
        page: u32,
    ) -> Result<bool, SdkError> {
        let total_pages = self.tabs.cache(tab).pagination().total_pages;
        if page >= total_pages && !(page == 0 && total_pages == 0) {
            return Ok(false);
        }
        self.fetch(backend, tab, FetchKind::Page, PageRequest::new(page, self.page_size))
            .await
    }

    // ── Create / edit ────────────────────────────────────────────────────

    /// Validate and submit a new listing. Validation failures are returned
    /// before any network call.
    pub async fn create_listing<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        draft: &ListingDraft,
    ) -> Result<MutationOutcome, SdkError> {
        let validated = draft.validate(DraftPurpose::Create)?;
        let guard = self.mutation.begin(MutationKind::Create)?;
        let id = backend.create_listing(&validated).await?;
        tracing::debug!("Listing created (id {:?})", id.as_ref().map(ListingId::as_str));
        Ok(self.refresh_after_mutation(backend, guard).await)
    }

    pub async fn edit_listing<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: &ListingId,
        draft: &ListingDraft,
    ) -> Result<MutationOutcome, SdkError> {
        let validated: ValidatedDraft = draft.validate(DraftPurpose::Edit)?;
        let guard = self.mutation.begin(MutationKind::Edit)?;
        backend.update_listing(id, &validated).await?;
        if let Some(tab) = self.tabs.locate(id) {
            self.tabs.cache_mut(tab).update(id, |l| validated.apply_to(l));
        }
        Ok(self.refresh_after_mutation(backend, guard).await)
    }

    // ── Delete ───────────────────────────────────────────────────────────

    /// Open the delete confirmation. Sold listings cannot be deleted.
    pub fn request_delete(&mut self, id: ListingId) -> Result<(), SdkError> {
        if !self.tabs.can_delete(&id) {
            return Err(SdkError::Validation(format!(
                "Listing {} is sold and cannot be deleted",
                id
            )));
        }
        self.pending_delete.request(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete.cancel();
    }

    /// Delete the pending listing. Once the action starts the confirmation
    /// is closed whatever happens; a `Busy` rejection leaves it open.
    pub async fn confirm_delete<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<MutationOutcome, SdkError> {
        let guard = self.mutation.begin(MutationKind::Delete)?;
        let id = self.pending_delete.take()?;
        backend.delete_listing(&id).await?;
        if let Err(e) = self.tabs.remove(&id) {
            tracing::warn!("Backend deleted {} but the local patch was refused: {}", id, e);
        }
        Ok(self.refresh_after_mutation(backend, guard).await)
    }

    // ── Mark as sold ─────────────────────────────────────────────────────

    /// Open the mark-as-sold confirmation. There is no way back from sold.
    pub fn request_mark_sold(&mut self, id: ListingId) -> Result<(), SdkError> {
        if self.tabs.locate(&id) == Some(Tab::Sold) {
            return Err(SdkError::Validation(format!("Listing {} is already sold", id)));
        }
        self.pending_sold.request(id);
        Ok(())
    }

    pub fn cancel_mark_sold(&mut self) {
        self.pending_sold.cancel();
    }

    pub async fn confirm_mark_sold<B: MarketBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<MutationOutcome, SdkError> {
        let guard = self.mutation.begin(MutationKind::MarkSold)?;
        let id = self.pending_sold.take()?;
        backend.mark_listing_sold(&id).await?;
        self.tabs.move_to_sold(&id);
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
