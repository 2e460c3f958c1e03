//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

// ─── ListingId ───────────────────────────────────────────────────────────────

/// Newtype for listing identifiers (server-assigned UUID strings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a URL path segment.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<uuid::Uuid> for ListingId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for ListingId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ListingId(s.to_string()))
    }
}

impl Serialize for ListingId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ListingId(s))
    }
}

// ─── PageRequest ─────────────────────────────────────────────────────────────

/// Zero-based page coordinates sent with every listing search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn first(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
        }
    }

    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

// ─── PaginationMeta ──────────────────────────────────────────────────────────

/// Pagination metadata for one page of listings.
///
/// `total_pages` is always `ceil(total_elements / page_size)` and, whenever
/// there is at least one element, `current_page < total_pages`. Every
/// constructor re-derives `total_pages` so the invariant cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total_elements: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
}

impl PaginationMeta {
    pub fn new(total_elements: u64, current_page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_elements.div_ceil(u64::from(page_size));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let current_page = if total_pages == 0 {
            0
        } else {
            current_page.min(total_pages - 1)
        };

        Self {
            total_elements,
            total_pages,
            current_page,
            page_size,
        }
    }

    pub fn empty(page_size: u32) -> Self {
        Self::new(0, 0, page_size)
    }

    /// Same page coordinates with a different element count.
    pub fn with_total_elements(&self, total_elements: u64) -> Self {
        Self::new(total_elements, self.current_page, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    /// The request that reloads the current page.
    pub fn current_request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.page_size)
    }

    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_next()
            .then(|| PageRequest::new(self.current_page + 1, self.page_size))
    }

    pub fn prev_request(&self) -> Option<PageRequest> {
        self.has_prev()
            .then(|| PageRequest::new(self.current_page - 1, self.page_size))
    }
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let meta = PaginationMeta::new(41, 0, 20);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next());
        assert!(!meta.has_prev());
    }

    #[test]
    fn test_current_page_clamped_to_last_page() {
        let meta = PaginationMeta::new(21, 5, 20);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.current_page, 1);
    }

    #[test]
    fn test_empty_has_no_pages() {
        let meta = PaginationMeta::empty(10);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.current_page, 0);
        assert!(meta.next_request().is_none());
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let meta = PaginationMeta::new(3, 0, 0);
        assert_eq!(meta.page_size, 1);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_shrinking_total_moves_back_a_page() {
        let meta = PaginationMeta::new(21, 1, 20);
        let shrunk = meta.with_total_elements(20);
        assert_eq!(shrunk.total_pages, 1);
        assert_eq!(shrunk.current_page, 0);
    }

    #[test]
    fn test_listing_id_path_segment_is_encoded() {
        let id = ListingId::from("a b/c");
        assert_eq!(id.path_segment(), "a%20b%2Fc");
    }
}
