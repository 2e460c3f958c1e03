//! Active/sold tab pair for a seller's own listings.

use super::state::{FetchTicket, PagedResultCache};
use super::{Listing, ListingPage, ListingStatus};
use crate::error::SdkError;
use crate::shared::ListingId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Active,
    Sold,
}

impl Tab {
    pub fn status(&self) -> ListingStatus {
        match self {
            Tab::Active => ListingStatus::Active,
            Tab::Sold => ListingStatus::Sold,
        }
    }

    pub fn other(&self) -> Tab {
        match self {
            Tab::Active => Tab::Sold,
            Tab::Sold => Tab::Active,
        }
    }
}

/// Two result caches whose id sets never overlap.
///
/// A listing moves from active to sold exactly once; there is no way back.
#[derive(Debug, Clone, Default)]
pub struct ListingTabs {
    active: PagedResultCache,
    sold: PagedResultCache,
}

impl ListingTabs {
    pub fn new(page_size: u32) -> Self {
        Self {
            active: PagedResultCache::new(page_size),
            sold: PagedResultCache::new(page_size),
        }
    }

    pub fn cache(&self, tab: Tab) -> &PagedResultCache {
        match tab {
            Tab::Active => &self.active,
            Tab::Sold => &self.sold,
        }
    }

    pub fn cache_mut(&mut self, tab: Tab) -> &mut PagedResultCache {
        match tab {
            Tab::Active => &mut self.active,
            Tab::Sold => &mut self.sold,
        }
    }

    pub fn active(&self) -> &PagedResultCache {
        &self.active
    }

    pub fn sold(&self) -> &PagedResultCache {
        &self.sold
    }

    pub fn begin_fetch(&mut self, tab: Tab) -> FetchTicket {
        self.cache_mut(tab).begin_fetch()
    }

    /// Apply a fetched page to `tab`, evicting the fetched ids from the other
    /// tab so the two sets stay disjoint. Stale pages are dropped.
    pub fn apply_fetch(&mut self, tab: Tab, ticket: FetchTicket, page: ListingPage) -> bool {
        let fetched: Vec<ListingId> = page.listings.iter().map(|l| l.id.clone()).collect();
        if !self.cache_mut(tab).apply_fetch(ticket, page) {
            return false;
        }
        let other = self.cache_mut(tab.other());
        for id in &fetched {
            if other.remove(id) {
                tracing::debug!("Evicted listing {} from {:?} tab", id, tab.other());
            }
        }
        true
    }

    /// Which tab holds this id.
    pub fn locate(&self, id: &ListingId) -> Option<Tab> {
        if self.active.contains(id) {
            Some(Tab::Active)
        } else if self.sold.contains(id) {
            Some(Tab::Sold)
        } else {
            None
        }
    }

    /// Delete is only offered for listings that are not sold.
    pub fn can_delete(&self, id: &ListingId) -> bool {
        self.locate(id) != Some(Tab::Sold)
    }

    /// Take the listing out of active, mark it sold and put it first in sold.
    ///
    /// Returns `false` if the id is not in the active tab.
    pub fn move_to_sold(&mut self, id: &ListingId) -> bool {
        match self.active.take(id) {
            Some(mut listing) => {
                listing.status = ListingStatus::Sold;
                self.sold.prepend(listing);
                true
            }
            None => false,
        }
    }

    /// Remove from whichever tab holds the id. Sold listings are rejected.
    pub fn remove(&mut self, id: &ListingId) -> Result<Option<Listing>, SdkError> {
        match self.locate(id) {
            Some(Tab::Sold) => Err(SdkError::Validation(format!(
                "Listing {} is sold and cannot be deleted",
                id
            ))),
            Some(Tab::Active) => Ok(self.active.take(id)),
            None => Ok(None),
        }
    }

    /// Insert or replace a listing in the tab matching its status.
    pub fn upsert(&mut self, listing: Listing) {
        let tab = if listing.is_sold() {
            Tab::Sold
        } else {
            Tab::Active
        };
        self.cache_mut(tab.other()).remove(&listing.id);
        self.cache_mut(tab).upsert(listing);
    }
}
