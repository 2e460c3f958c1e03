//! Backend JSON → validated page → local filter/sort, end to end.

use cardmarket_sdk::domain::filter::to_search_request;
use cardmarket_sdk::domain::listing::wire::ListingsPageResponse;
use cardmarket_sdk::prelude::*;
use rust_decimal::Decimal;

const PAGE_JSON: &str = r#"{
    "listings": [
        {
            "id": "0b7e2a6c-1111-4c4c-9c9c-000000000001",
            "listingTitle": "Gengar",
            "price": 12,
            "mainImage": "https://img/g.png",
            "images": ["https://img/g.png", "https://img/g2.png"],
            "rarity": "Common",
            "cardCondition": "Lightly Used",
            "cardType": "Pokemon Card",
            "username": "brock",
            "region": "North Region",
            "listingStatus": "Active"
        },
        {
            "id": "0b7e2a6c-1111-4c4c-9c9c-000000000002",
            "listingTitle": "Rayquaza VMAX",
            "price": "95.50",
            "mainImage": "https://img/r.png",
            "rarity": "Hyper Rare",
            "cardCondition": "Brand New",
            "cardType": "Pokemon Card",
            "username": "misty",
            "region": "Central Region",
            "listingStatus": "Active"
        },
        {
            "id": "0b7e2a6c-1111-4c4c-9c9c-000000000003",
            "listingTitle": "Professor's Research",
            "price": 4,
            "mainImage": "https://img/p.png",
            "rarity": "Rare",
            "cardCondition": "Damage",
            "cardType": "Trainer Card",
            "username": "misty",
            "region": "East Region",
            "listingStatus": "Active"
        },
        {
            "id": "0b7e2a6c-1111-4c4c-9c9c-000000000004",
            "listingTitle": "Broken",
            "price": 0,
            "mainImage": "https://img/x.png"
        }
    ],
    "totalElements": 4,
    "totalPages": 1,
    "currentPage": 0,
    "pageSize": 20
}"#;

fn page() -> ListingPage {
    let resp: ListingsPageResponse = serde_json::from_str(PAGE_JSON).unwrap();
    ListingPage::from(resp)
}

fn titles(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.title.as_str()).collect()
}

#[test]
fn test_invalid_listings_are_dropped() {
    let page = page();
    assert_eq!(
        titles(&page.listings),
        vec!["Gengar", "Rayquaza VMAX", "Professor's Research"]
    );
    assert_eq!(page.listings[0].additional_images, vec!["https://img/g2.png"]);
    assert_eq!(page.listings[2].condition, CardCondition::Damaged);
}

#[test]
fn test_rarity_sort_ascending() {
    let filters = FilterState::reset(FilteringMode::Server).with_sort("rarity-asc");
    let sorted = apply_filters(&page().listings, &filters);
    assert_eq!(
        titles(&sorted),
        vec!["Gengar", "Professor's Research", "Rayquaza VMAX"]
    );
}

#[test]
fn test_client_mode_price_fallbacks() {
    // min 10 holds; "abc" falls back to the 100 ceiling.
    let filters = FilterState::reset(FilteringMode::Client).with_price_range("10", "abc");
    let visible = apply_filters(&page().listings, &filters);
    assert_eq!(titles(&visible), vec!["Gengar", "Rayquaza VMAX"]);
}

#[test]
fn test_combined_filters_and_payout() {
    let filters = FilterState::reset(FilteringMode::Client)
        .toggle_region(Region::Central)
        .toggle_card_type(CardType::PokemonCard)
        .with_sort("price-desc");
    let visible = apply_filters(&page().listings, &filters);
    assert_eq!(titles(&visible), vec!["Rayquaza VMAX"]);
    // Hyper Rare carries a 10% platform fee.
    assert_eq!(visible[0].seller_payout(), Decimal::new(85950, 3));
}

#[test]
fn test_search_request_matches_filter_panel() {
    let filters = FilterState::reset(FilteringMode::Server)
        .with_search_query("  ray ")
        .with_min_price("5")
        .toggle_rarity(Rarity::HyperRare)
        .with_sort("price-desc");
    let request = to_search_request(&filters, &SearchScope::explore(), PageRequest::new(2, 20));
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["listingTitle"], "ray");
    assert_eq!(json["minPrice"].as_f64(), Some(5.0));
    assert_eq!(json["rarities"], serde_json::json!(["Hyper Rare"]));
    assert_eq!(json["sortBy"], "price");
    assert_eq!(json["sortOrder"], "desc");
    assert_eq!(json["page"], 2);
    assert!(json.get("maxPrice").is_none());
}
