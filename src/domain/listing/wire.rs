//! Wire types for listing requests and responses.

use super::attributes::{CardCondition, CardType, Rarity, Region};
use crate::shared::serde_util::{decimal_number, opt_decimal_number};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single listing as sent by the search and detail endpoints.
///
/// Search results carry `mainImage` plus the full `images` array (primary
/// first); the detail endpoint only carries `images`. Seller fields and the
/// wishlist flag are optional because not every endpoint populates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "title")]
    pub listing_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "decimal_number")]
    pub price: Decimal,
    #[serde(default, alias = "imageUrl")]
    pub main_image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub rarity: Option<Rarity>,
    #[serde(default, alias = "condition")]
    pub card_condition: Option<CardCondition>,
    #[serde(default)]
    pub card_type: Option<CardType>,
    #[serde(default, alias = "sellerName")]
    pub username: Option<String>,
    #[serde(default, alias = "sellerId")]
    pub user_id: Option<String>,
    #[serde(default, alias = "sellerRegion", alias = "location")]
    pub region: Option<Region>,
    #[serde(default, alias = "status")]
    pub listing_status: Option<String>,
    #[serde(default, alias = "isSold", alias = "sold")]
    pub sold_status: Option<bool>,
    #[serde(default)]
    pub in_cart: bool,
    #[serde(default)]
    pub listed_on: Option<NaiveDateTime>,
}

/// Response of `POST /listing/get-all-listing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsPageResponse {
    #[serde(default)]
    pub listings: Vec<ListingResponse>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
}

/// Body of `POST /listing/get-all-listing`.
///
/// Every optional field is omitted when it carries no restriction, so the
/// backend never sees empty arrays, empty strings or placeholder prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSearchRequest {
    pub page: u32,
    pub size: u32,
    pub exclude_current_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "opt_decimal_number"
    )]
    pub min_price: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "opt_decimal_number"
    )]
    pub max_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listing_statuses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rarities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

/// JSON metadata sent as the `data` part of create/update multipart requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    pub listing_title: String,
    pub card_condition: String,
    pub card_type: String,
    pub rarity: String,
    /// Already-hosted images to keep, primary first.
    pub images: Vec<String>,
    #[serde(with = "decimal_number")]
    pub price: Decimal,
    pub description: String,
}
