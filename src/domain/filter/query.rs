//! FilterState → backend search request.

use super::local::parse_bound;
use super::{FilterState, SortOption};
use crate::domain::listing::wire::ListingSearchRequest;
use crate::domain::listing::ListingStatus;
use crate::shared::PageRequest;
use rust_decimal::Decimal;

/// Which listings a view searches over, independent of the user's filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchScope {
    pub exclude_current_user: bool,
    pub username: Option<String>,
    pub statuses: Vec<ListingStatus>,
}

impl SearchScope {
    /// Marketplace browsing: other sellers' active listings.
    pub fn explore() -> Self {
        Self {
            exclude_current_user: true,
            username: None,
            statuses: vec![ListingStatus::Active],
        }
    }

    /// One seller's listings in one status (profile tabs, seller pages).
    pub fn seller(username: impl Into<String>, status: ListingStatus) -> Self {
        Self {
            exclude_current_user: false,
            username: Some(username.into()),
            statuses: vec![status],
        }
    }
}

/// Builds the search body, leaving out every field that carries no
/// restriction. Price bounds that are blank, unparsable or not positive are
/// omitted rather than sent as `0`.
pub fn to_search_request(
    filters: &FilterState,
    scope: &SearchScope,
    page: PageRequest,
) -> ListingSearchRequest {
    let (sort_by, sort_order) = match filters.sort_by() {
        SortOption::Default => (None, None),
        SortOption::By(key, dir) => (
            Some(key.as_str().to_string()),
            Some(dir.as_str().to_string()),
        ),
    };

    ListingSearchRequest {
        page: page.page,
        size: page.size,
        exclude_current_user: scope.exclude_current_user,
        listing_title: non_blank(filters.search_query()),
        min_price: positive_bound(filters.min_price()),
        max_price: positive_bound(filters.max_price()),
        listing_statuses: scope.statuses.iter().map(|s| s.as_str().to_string()).collect(),
        rarities: names(filters.rarities()),
        conditions: names(filters.conditions()),
        card_types: names(filters.card_types()),
        regions: names(filters.regions()),
        username: scope.username.as_deref().and_then(non_blank),
        sort_by,
        sort_order,
    }
}

fn positive_bound(raw: &str) -> Option<Decimal> {
    parse_bound(raw).filter(|p| *p > Decimal::ZERO)
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn names<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
