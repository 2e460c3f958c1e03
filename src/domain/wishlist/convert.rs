//! Conversion: cart wire types → wishlist domain types.

use super::wire::{CartGroupResponse, CartItemResponse};
use super::{Wishlist, WishlistGroup, WishlistItem};
use crate::domain::listing::CardCondition;
use crate::shared::ListingId;

impl TryFrom<CartItemResponse> for WishlistItem {
    type Error = String;

    fn try_from(source: CartItemResponse) -> Result<Self, Self::Error> {
        let id = source
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| format!("wishlist item '{}' has no id", source.listing_title))?;
        Ok(WishlistItem {
            id: ListingId::from(id),
            title: source.listing_title,
            condition: source
                .card_condition
                .unwrap_or_else(|| CardCondition::Other(String::new())),
            price: source.price,
            main_image: source.main_image.unwrap_or_default(),
        })
    }
}

impl From<CartGroupResponse> for WishlistGroup {
    fn from(source: CartGroupResponse) -> Self {
        let items = source
            .items
            .into_iter()
            .filter_map(|item| match WishlistItem::try_from(item) {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::warn!("Dropping wishlist item: {}", err);
                    None
                }
            })
            .collect();
        WishlistGroup {
            seller_name: source.seller_name,
            items,
        }
    }
}

impl From<Vec<CartGroupResponse>> for Wishlist {
    fn from(source: Vec<CartGroupResponse>) -> Self {
        Wishlist::new(source.into_iter().map(WishlistGroup::from).collect())
    }
}
