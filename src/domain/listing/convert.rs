//! Conversion: wire listing types → domain types (TryFrom + validation).

use super::attributes::{CardCondition, CardType, ListingStatus, Rarity};
use super::wire;
use super::{Listing, ListingPage, ValidationError, MAX_ADDITIONAL_IMAGES};
use crate::shared::{ListingId, PaginationMeta};
use rust_decimal::Decimal;

impl TryFrom<wire::ListingResponse> for Listing {
    type Error = ValidationError;

    fn try_from(source: wire::ListingResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();

        let id = source.id.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| {
            errors.push(ValidationError::MissingId);
            String::new()
        });
        let title = source.listing_title.clone().unwrap_or_else(|| {
            errors.push(ValidationError::MissingTitle);
            String::new()
        });

        if source.price <= Decimal::ZERO {
            errors.push(ValidationError::NonPositivePrice(source.price));
        }

        let (image_url, additional_images) =
            split_images(source.main_image.clone(), source.images.clone().unwrap_or_default());
        if image_url.is_empty() {
            errors.push(ValidationError::MissingImage);
        }
        if additional_images.len() > MAX_ADDITIONAL_IMAGES {
            errors.push(ValidationError::TooManyImages(additional_images.len()));
        }

        let status = match (&source.listing_status, source.sold_status) {
            (Some(raw), _) => ListingStatus::from_str(raw).unwrap_or_else(|| {
                errors.push(ValidationError::InvalidStatus(raw.clone()));
                ListingStatus::Active
            }),
            (None, Some(true)) => ListingStatus::Sold,
            (None, _) => ListingStatus::Active,
        };

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(id, errors));
        }

        Ok(Listing {
            id: ListingId::from(id),
            title,
            description: source.description.unwrap_or_default(),
            price: source.price,
            image_url,
            additional_images,
            rarity: source.rarity.unwrap_or_else(|| Rarity::Other(String::new())),
            condition: source
                .card_condition
                .unwrap_or_else(|| CardCondition::Other(String::new())),
            card_type: source.card_type.unwrap_or_else(|| CardType::Other(String::new())),
            seller_id: source.user_id,
            seller_name: source.username.unwrap_or_default(),
            seller_region: source.region,
            status,
            in_cart: source.in_cart,
            listed_on: source.listed_on,
        })
    }
}

/// Splits the backend image fields into a primary image and the rest.
///
/// `images` usually repeats the primary image at index 0; it is dropped from
/// the additional list so it is not shown twice.
fn split_images(main_image: Option<String>, images: Vec<String>) -> (String, Vec<String>) {
    let mut rest: Vec<String> = images.into_iter().filter(|u| !u.is_empty()).collect();
    let primary = match main_image.filter(|u| !u.is_empty()) {
        Some(main) => {
            if let Some(pos) = rest.iter().position(|u| *u == main) {
                rest.remove(pos);
            }
            main
        }
        None if !rest.is_empty() => rest.remove(0),
        None => String::new(),
    };
    (primary, rest)
}

impl From<wire::ListingsPageResponse> for ListingPage {
    /// Converts a search page, dropping listings that fail validation.
    fn from(source: wire::ListingsPageResponse) -> Self {
        let pagination =
            PaginationMeta::new(source.total_elements, source.current_page, source.page_size);
        let listings = source
            .listings
            .into_iter()
            .filter_map(|l| match Listing::try_from(l) {
                Ok(listing) => Some(listing),
                Err(err) => {
                    tracing::warn!("Dropping invalid listing from page: {}", err);
                    None
                }
            })
            .collect();

        ListingPage {
            listings,
            pagination,
        }
    }
}
