//! Wishlist domain: saved listings grouped by seller.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::domain::listing::CardCondition;
use crate::shared::ListingId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A saved listing as shown on the wishlist page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ListingId,
    pub title: String,
    pub condition: CardCondition,
    pub price: Decimal,
    pub main_image: String,
}

/// Saved listings from one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistGroup {
    pub seller_name: String,
    pub items: Vec<WishlistItem>,
}

/// The viewer's whole wishlist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wishlist {
    groups: Vec<WishlistGroup>,
}

impl Wishlist {
    pub fn new(groups: Vec<WishlistGroup>) -> Self {
        let groups = groups.into_iter().filter(|g| !g.items.is_empty()).collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[WishlistGroup] {
        &self.groups
    }

    pub fn items(&self) -> impl Iterator<Item = &WishlistItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn contains(&self, id: &ListingId) -> bool {
        self.items().any(|item| item.id == *id)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_price(&self) -> Decimal {
        self.items().map(|item| item.price).sum()
    }

    /// Drop an item; a seller group left empty is dropped too.
    pub fn remove(&mut self, id: &ListingId) -> Option<WishlistItem> {
        let (group_idx, item_idx) = self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.items.iter().position(|item| item.id == *id).map(|ii| (gi, ii))
        })?;
        let item = self.groups[group_idx].items.remove(item_idx);
        if self.groups[group_idx].items.is_empty() {
            self.groups.remove(group_idx);
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> WishlistItem {
        WishlistItem {
            id: ListingId::from(id),
            title: format!("Card {id}"),
            condition: CardCondition::LikeNew,
            price: Decimal::from(price),
            main_image: String::new(),
        }
    }

    fn sample() -> Wishlist {
        Wishlist::new(vec![
            WishlistGroup {
                seller_name: "misty".into(),
                items: vec![item("a", 10), item("b", 5)],
            },
            WishlistGroup {
                seller_name: "brock".into(),
                items: vec![item("c", 20)],
            },
            WishlistGroup {
                seller_name: "nobody".into(),
                items: Vec::new(),
            },
        ])
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let list = sample();
        assert_eq!(list.groups().len(), 2);
        assert_eq!(list.len(), 3);
        assert_eq!(list.total_price(), Decimal::from(35));
    }

    #[test]
    fn test_remove_last_item_drops_group() {
        let mut list = sample();
        assert!(list.remove(&ListingId::from("c")).is_some());
        assert_eq!(list.groups().len(), 1);
        assert!(!list.contains(&ListingId::from("c")));
        assert!(list.remove(&ListingId::from("c")).is_none());
    }
}
