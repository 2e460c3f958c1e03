//! Filter domain: search/sort/filter criteria and the two ways of applying
//! them: translated into a backend query ([`query`]) or evaluated in memory
//! ([`local`]).

pub mod local;
pub mod query;

use crate::domain::listing::{CardCondition, CardType, Rarity, Region};
use std::fmt;

pub use local::{apply_filters, apply_filters_with_bounds, PriceBounds};
pub use query::{to_search_request, SearchScope};

/// Where filtering happens for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilteringMode {
    /// The backend filters and sorts; price bounds default to unbounded.
    #[default]
    Server,
    /// Everything is filtered in memory; price bounds default to 2..=100.
    Client,
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Price,
    Rarity,
    Condition,
}

impl SortKey {
    /// Field name the backend expects in `sortBy`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Rarity => "rarity",
            SortKey::Condition => "condition",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "price" => Some(SortKey::Price),
            "rarity" | "rarityPriority" => Some(SortKey::Rarity),
            "condition" | "conditionPriority" => Some(SortKey::Condition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// `default`, or `<key>-<direction>` such as `rarity-asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Keep the order the results arrived in.
    #[default]
    Default,
    By(SortKey, SortDirection),
}

impl SortOption {
    /// Parses a sort selector; anything unrecognised is `Default`.
    pub fn parse(s: &str) -> Self {
        s.trim()
            .rsplit_once('-')
            .and_then(|(key, dir)| Some(SortOption::By(SortKey::parse(key)?, SortDirection::parse(dir)?)))
            .unwrap_or(SortOption::Default)
    }

    pub fn as_string(&self) -> String {
        match self {
            SortOption::Default => "default".to_string(),
            SortOption::By(key, dir) => format!("{}-{}", key.as_str(), dir.as_str()),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for SortOption {
    fn from(s: &str) -> Self {
        SortOption::parse(s)
    }
}

// ─── FilterState ─────────────────────────────────────────────────────────────

/// User-chosen search, filter and sort criteria.
///
/// Immutable: every `with_*` / `toggle_*` call returns a new value, so two
/// states can be compared with `==` to tell whether anything changed.
/// Empty set fields match every listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    search_query: String,
    min_price: String,
    max_price: String,
    regions: Vec<Region>,
    rarities: Vec<Rarity>,
    conditions: Vec<CardCondition>,
    card_types: Vec<CardType>,
    sort_by: SortOption,
}

impl FilterState {
    /// The state a fresh view (or the reset button) starts from.
    pub fn reset(mode: FilteringMode) -> Self {
        match mode {
            FilteringMode::Server => Self::default(),
            FilteringMode::Client => Self {
                min_price: local::CLIENT_DEFAULT_MIN.to_string(),
                max_price: local::CLIENT_DEFAULT_MAX.to_string(),
                ..Self::default()
            },
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn min_price(&self) -> &str {
        &self.min_price
    }

    pub fn max_price(&self) -> &str {
        &self.max_price
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn rarities(&self) -> &[Rarity] {
        &self.rarities
    }

    pub fn conditions(&self) -> &[CardCondition] {
        &self.conditions
    }

    pub fn card_types(&self) -> &[CardType] {
        &self.card_types
    }

    pub fn sort_by(&self) -> SortOption {
        self.sort_by
    }

    pub fn with_search_query(&self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_min_price(&self, min: impl Into<String>) -> Self {
        Self {
            min_price: min.into(),
            ..self.clone()
        }
    }

    pub fn with_max_price(&self, max: impl Into<String>) -> Self {
        Self {
            max_price: max.into(),
            ..self.clone()
        }
    }

    pub fn with_price_range(&self, min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min_price: min.into(),
            max_price: max.into(),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort_by: impl Into<SortOption>) -> Self {
        Self {
            sort_by: sort_by.into(),
            ..self.clone()
        }
    }

    pub fn toggle_region(&self, region: Region) -> Self {
        Self {
            regions: toggled(&self.regions, region),
            ..self.clone()
        }
    }

    pub fn toggle_rarity(&self, rarity: Rarity) -> Self {
        Self {
            rarities: toggled(&self.rarities, rarity),
            ..self.clone()
        }
    }

    pub fn toggle_condition(&self, condition: CardCondition) -> Self {
        Self {
            conditions: toggled(&self.conditions, condition),
            ..self.clone()
        }
    }

    pub fn toggle_card_type(&self, card_type: CardType) -> Self {
        Self {
            card_types: toggled(&self.card_types, card_type),
            ..self.clone()
        }
    }

    /// Number of active set restrictions, for "Filters (3)" style badges.
    pub fn active_filter_count(&self) -> usize {
        self.regions.len() + self.rarities.len() + self.conditions.len() + self.card_types.len()
    }
}

/// Removes `value` if present, otherwise appends it. Insertion order is kept.
fn toggled<T: Clone + PartialEq>(values: &[T], value: T) -> Vec<T> {
    if values.contains(&value) {
        values.iter().filter(|v| **v != value).cloned().collect()
    } else {
        let mut next = values.to_vec();
        next.push(value);
        next
    }
}
