//! In-memory filter/sort engine for pages the backend did not filter.
//!
//! Pipeline, in order: title substring, price range, region, rarity,
//! condition, card type, then a stable sort. Empty set criteria are skipped.

use super::{FilterState, SortDirection, SortKey, SortOption};
use crate::domain::listing::Listing;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

pub(crate) const CLIENT_DEFAULT_MIN: &str = "2";
pub(crate) const CLIENT_DEFAULT_MAX: &str = "100";

/// Bounds used when a price field is blank, unparsable or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBounds {
    pub min_fallback: Option<Decimal>,
    pub max_fallback: Option<Decimal>,
}

impl PriceBounds {
    /// Falls back to 2..=100.
    pub const CLIENT_DEFAULT: PriceBounds = PriceBounds {
        min_fallback: Some(Decimal::TWO),
        max_fallback: Some(Decimal::ONE_HUNDRED),
    };

    /// Missing bounds do not restrict at all.
    pub const UNBOUNDED: PriceBounds = PriceBounds {
        min_fallback: None,
        max_fallback: None,
    };

    pub fn for_mode(mode: super::FilteringMode) -> Self {
        match mode {
            super::FilteringMode::Client => Self::CLIENT_DEFAULT,
            super::FilteringMode::Server => Self::UNBOUNDED,
        }
    }

    fn resolve(&self, filters: &FilterState) -> (Option<Decimal>, Option<Decimal>) {
        (
            parse_bound(filters.min_price()).or(self.min_fallback),
            parse_bound(filters.max_price()).or(self.max_fallback),
        )
    }
}

/// Filters and sorts with the client-mode price defaults (2..=100).
pub fn apply_filters(listings: &[Listing], filters: &FilterState) -> Vec<Listing> {
    apply_filters_with_bounds(listings, filters, PriceBounds::CLIENT_DEFAULT)
}

pub fn apply_filters_with_bounds(
    listings: &[Listing],
    filters: &FilterState,
    bounds: PriceBounds,
) -> Vec<Listing> {
    let query = filters.search_query().to_lowercase();
    let (min, max) = bounds.resolve(filters);

    let mut result: Vec<Listing> = listings
        .iter()
        .filter(|l| query.is_empty() || l.title.to_lowercase().contains(&query))
        .filter(|l| min.map_or(true, |m| l.price >= m) && max.map_or(true, |m| l.price <= m))
        .filter(|l| matches_any(filters.regions(), l.seller_region.as_ref()))
        .filter(|l| matches_any(filters.rarities(), Some(&l.rarity)))
        .filter(|l| matches_any(filters.conditions(), Some(&l.condition)))
        .filter(|l| matches_any(filters.card_types(), Some(&l.card_type)))
        .cloned()
        .collect();

    sort_listings(&mut result, filters.sort_by());
    result
}

fn matches_any<T: PartialEq>(allowed: &[T], value: Option<&T>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.contains(v))
}

/// Stable sort by the selected key. Unknown rarity/condition values have tier
/// `-1` and sort before every known tier when ascending.
pub fn sort_listings(listings: &mut [Listing], sort: SortOption) {
    let SortOption::By(key, direction) = sort else {
        return;
    };
    listings.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &Listing, b: &Listing, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Rarity => a.rarity.tier().cmp(&b.rarity.tier()),
        SortKey::Condition => a.condition.tier().cmp(&b.condition.tier()),
    }
}

/// Parses the leading number of a user-typed price, ignoring trailing junk
/// (`"12abc"` is 12). Blank, unparsable and zero inputs yield `None`.
pub fn parse_bound(raw: &str) -> Option<Decimal> {
    let prefix = numeric_prefix(raw.trim_start())?;
    let value = Decimal::from_str(&prefix)
        .or_else(|_| Decimal::from_scientific(&prefix))
        .ok()?;
    (!value.is_zero()).then_some(value)
}

/// Longest `[sign] digits [. digits] [e [sign] digits]` prefix, with a zero
/// inserted before a bare leading dot.
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let sign_len = end;
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let prefix = &s[..end];
    if int_digits == 0 {
        Some(format!("{}0{}", &prefix[..sign_len], &prefix[sign_len..]))
    } else {
        Some(prefix.to_string())
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilteringMode;
    use crate::domain::listing::{CardCondition, CardType, ListingStatus, Rarity, Region};
    use crate::shared::ListingId;

    fn listing(id: &str, title: &str, price: i64, rarity: Rarity) -> Listing {
        Listing {
            id: ListingId::from(id),
            title: title.to_string(),
            description: String::new(),
            price: Decimal::from(price),
            image_url: format!("https://img/{id}.png"),
            additional_images: Vec::new(),
            rarity,
            condition: CardCondition::LikeNew,
            card_type: CardType::PokemonCard,
            seller_id: None,
            seller_name: "brock".to_string(),
            seller_region: Some(Region::Central),
            status: ListingStatus::Active,
            in_cart: false,
            listed_on: None,
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", "Pikachu Promo", 15, Rarity::Common),
            listing("b", "Charizard VMAX", 80, Rarity::HyperRare),
            listing("c", "Pikachu Full Art", 40, Rarity::Rare),
        ]
    }

    #[test]
    fn test_reset_state_is_identity_within_default_band() {
        let input = sample();
        let out = apply_filters(&input, &FilterState::reset(FilteringMode::Client));
        assert_eq!(out, input);
        let out = apply_filters_with_bounds(&input, &FilterState::default(), PriceBounds::UNBOUNDED);
        assert_eq!(out, input);
    }

    #[test]
    fn test_idempotent() {
        let filters = FilterState::default()
            .with_search_query("pika")
            .with_sort("price-desc");
        let once = apply_filters(&sample(), &filters);
        let twice = apply_filters(&once, &filters);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), ["c", "a"]);
    }

    #[test]
    fn test_rarity_sort_uses_tier_order() {
        let filters = FilterState::default().with_sort("rarity-asc");
        assert_eq!(ids(&apply_filters(&sample(), &filters)), ["a", "c", "b"]);
        let filters = FilterState::default().with_sort("rarity-desc");
        assert_eq!(ids(&apply_filters(&sample(), &filters)), ["b", "c", "a"]);
    }

    #[test]
    fn test_unknown_rarity_sorts_first_ascending() {
        let mut input = sample();
        input.push(listing("d", "Mystery", 20, Rarity::Other("Promo".into())));
        let filters = FilterState::default().with_sort("rarity-asc");
        assert_eq!(ids(&apply_filters(&input, &filters)), ["d", "a", "c", "b"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let input = vec![
            listing("x", "One", 10, Rarity::Rare),
            listing("y", "Two", 10, Rarity::Rare),
            listing("z", "Three", 5, Rarity::Rare),
        ];
        let filters = FilterState::default().with_sort("price-asc");
        assert_eq!(ids(&apply_filters(&input, &filters)), ["z", "x", "y"]);
        let filters = FilterState::default().with_sort("rarity-asc");
        assert_eq!(ids(&apply_filters(&input, &filters)), ["x", "y", "z"]);
    }

    #[test]
    fn test_unparsable_max_falls_back_to_default() {
        let mut input = sample();
        input.push(listing("e", "Expensive", 150, Rarity::Rare));
        input.push(listing("f", "Cheap", 5, Rarity::Rare));
        let filters = FilterState::default().with_price_range("10", "abc");
        assert_eq!(ids(&apply_filters(&input, &filters)), ["a", "b", "c"]);
    }

    #[test]
    fn test_zero_bound_falls_back_like_blank() {
        let filters = FilterState::default().with_price_range("0", "");
        let out = apply_filters(&[listing("f", "Cheap", 1, Rarity::Rare)], &filters);
        assert!(out.is_empty());
    }

    #[test]
    fn test_set_filters_skip_when_empty() {
        let filters = FilterState::default().toggle_rarity(Rarity::Rare);
        assert_eq!(ids(&apply_filters(&sample(), &filters)), ["c"]);

        let filters = FilterState::default().toggle_region(Region::West);
        assert!(apply_filters(&sample(), &filters).is_empty());

        let filters = FilterState::default().toggle_card_type(CardType::TrainerCard);
        assert!(apply_filters(&sample(), &filters).is_empty());
    }

    #[test]
    fn test_numeric_prefix_parsing() {
        assert_eq!(parse_bound("12abc"), Some(Decimal::from(12)));
        assert_eq!(parse_bound(" 7.5"), Some(Decimal::new(75, 1)));
        assert_eq!(parse_bound("5."), Some(Decimal::from(5)));
        assert_eq!(parse_bound(".5"), Some(Decimal::new(5, 1)));
        assert_eq!(parse_bound("1e2"), Some(Decimal::from(100)));
        assert_eq!(parse_bound("-3"), Some(Decimal::from(-3)));
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound("."), None);
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("0"), None);
    }
}
