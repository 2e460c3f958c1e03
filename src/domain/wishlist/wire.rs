//! Wire types for `GET /cart/get-cart-items`.

use crate::domain::listing::CardCondition;
use crate::shared::serde_util::decimal_number;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub listing_title: String,
    #[serde(default)]
    pub card_condition: Option<CardCondition>,
    #[serde(with = "decimal_number")]
    pub price: Decimal,
    #[serde(default)]
    pub main_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartGroupResponse {
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub items: Vec<CartItemResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_groups_deserialize() {
        let json = r#"[{
            "sellerName": "misty",
            "items": [{
                "id": "0b7e2a6c-1111-4c4c-9c9c-000000000002",
                "listingTitle": "Starmie",
                "cardCondition": "Well Used",
                "price": 3.5,
                "mainImage": "https://img/s.png"
            }]
        }]"#;
        let groups: Vec<CartGroupResponse> = serde_json::from_str(json).unwrap();
        assert_eq!(groups[0].seller_name, "misty");
        assert_eq!(groups[0].items[0].price, Decimal::new(35, 1));
        assert_eq!(groups[0].items[0].card_condition, Some(CardCondition::WellUsed));
    }
}
