//! Listing state containers: app-owned, SDK-provided update logic.

use super::{Listing, ListingPage};
use crate::domain::filter::{apply_filters_with_bounds, FilterState, PriceBounds};
use crate::shared::{ListingId, PaginationMeta};

/// Proof that a fetch was issued. Only the most recently issued ticket may
/// write its response into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a fetch ticket must be handed back to apply_fetch"]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The current page of a listing view plus its pagination metadata.
///
/// The app (or a controller) owns one instance per view. The SDK provides
/// update methods.
#[derive(Debug, Clone, Default)]
pub struct PagedResultCache {
    listings: Vec<Listing>,
    pagination: PaginationMeta,
    issued: u64,
}

impl PagedResultCache {
    pub fn new(page_size: u32) -> Self {
        Self {
            listings: Vec::new(),
            pagination: PaginationMeta::empty(page_size),
            issued: 0,
        }
    }

    /// Issue a ticket for a fetch about to start. Any ticket issued earlier
    /// becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            generation: self.issued,
        }
    }

    /// Whether `ticket` is still the latest issued one.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.issued
    }

    /// Apply a fetched page if it belongs to the latest issued fetch.
    ///
    /// Returns `false` (and leaves the cache untouched) for stale responses.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, page: ListingPage) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Dropping stale listing page (generation {}, latest {})",
                ticket.generation,
                self.issued
            );
            return false;
        }
        self.replace(page.listings, page.pagination);
        true
    }

    /// Full overwrite.
    pub fn replace(&mut self, listings: Vec<Listing>, pagination: PaginationMeta) {
        self.listings = listings;
        self.pagination = pagination;
    }

    /// Derived view of the held page; no network, cache unchanged.
    pub fn apply_local_filter(&self, filters: &FilterState, bounds: PriceBounds) -> Vec<Listing> {
        apply_filters_with_bounds(&self.listings, filters, bounds)
    }

    /// Replace the listing with the same id, or append it.
    ///
    /// Appending counts towards `total_elements`.
    pub fn upsert(&mut self, listing: Listing) {
        match self.position(&listing.id) {
            Some(idx) => self.listings[idx] = listing,
            None => {
                self.listings.push(listing);
                self.bump_total(1);
            }
        }
    }

    /// Drop a listing by id. Returns whether it was present.
    pub fn remove(&mut self, id: &ListingId) -> bool {
        self.take(id).is_some()
    }

    /// Remove and return a listing by id, adjusting the total.
    pub fn take(&mut self, id: &ListingId) -> Option<Listing> {
        let idx = self.position(id)?;
        let listing = self.listings.remove(idx);
        self.bump_total(-1);
        Some(listing)
    }

    /// Insert at the front, replacing any listing with the same id.
    pub fn prepend(&mut self, listing: Listing) {
        match self.position(&listing.id) {
            Some(idx) => {
                self.listings.remove(idx);
            }
            None => self.bump_total(1),
        }
        self.listings.insert(0, listing);
    }

    /// Apply `f` to the listing with this id, if held.
    pub fn update<F: FnOnce(&mut Listing)>(&mut self, id: &ListingId, f: F) -> bool {
        match self.listings.iter_mut().find(|l| l.id == *id) {
            Some(listing) => {
                f(listing);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == *id)
    }

    pub fn contains(&self, id: &ListingId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ListingId> {
        self.listings.iter().map(|l| &l.id)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn pagination(&self) -> &PaginationMeta {
        &self.pagination
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn clear(&mut self) {
        self.listings.clear();
        self.pagination = PaginationMeta::empty(self.pagination.page_size);
    }

    fn position(&self, id: &ListingId) -> Option<usize> {
        self.listings.iter().position(|l| l.id == *id)
    }

    fn bump_total(&mut self, delta: i64) {
        let total = (self.pagination.total_elements as i64 + delta).max(0) as u64;
        self.pagination = self.pagination.with_total_elements(total);
    }
}
