//! Create/edit payloads: raw form input validated before any network call.

use super::attributes::{CardCondition, CardType, Rarity};
use super::wire::ListingData;
use super::{Listing, MAX_ADDITIONAL_IMAGES};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which mutation a draft is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPurpose {
    Create,
    Edit,
}

/// A file attached to a draft that has not been uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Form state of the create/edit listing dialog.
///
/// Price is kept as the string the user typed; it is parsed on validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub rarity: Option<Rarity>,
    pub condition: Option<CardCondition>,
    pub card_type: Option<CardType>,
    /// Already-hosted primary image, if any.
    pub primary_image: Option<String>,
    /// Already-hosted additional images to keep.
    pub existing_images: Vec<String>,
    /// Files to upload, appended after the existing images.
    pub uploads: Vec<ImageUpload>,
}

impl ListingDraft {
    /// Pre-fills an edit form from an existing listing.
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price.normalize().to_string(),
            rarity: Some(listing.rarity.clone()),
            condition: Some(listing.condition.clone()),
            card_type: Some(listing.card_type.clone()),
            primary_image: Some(listing.image_url.clone()).filter(|u| !u.is_empty()),
            existing_images: listing.additional_images.clone(),
            uploads: Vec::new(),
        }
    }

    pub fn with_upload(mut self, upload: ImageUpload) -> Self {
        self.uploads.push(upload);
        self
    }

    /// Drops an already-hosted image from the draft, promoting the next one
    /// to primary when the primary is removed.
    pub fn remove_existing_image(&mut self, url: &str) {
        if self.primary_image.as_deref() == Some(url) {
            self.primary_image = if self.existing_images.is_empty() {
                None
            } else {
                Some(self.existing_images.remove(0))
            };
        } else {
            self.existing_images.retain(|u| u != url);
        }
    }

    fn hosted_images(&self) -> Vec<String> {
        self.primary_image
            .iter()
            .chain(self.existing_images.iter())
            .filter(|u| !u.is_empty())
            .cloned()
            .collect()
    }

    /// Total image count, primary included.
    pub fn image_count(&self) -> usize {
        self.hosted_images().len() + self.uploads.len()
    }

    /// Checks every field and returns all problems at once.
    pub fn validate(&self, purpose: DraftPurpose) -> Result<ValidatedDraft, DraftError> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new(DraftField::Title, "Title is required"));
        }

        let price = match parse_price(&self.price) {
            Some(p) if p > Decimal::ZERO => Some(p),
            Some(_) => {
                errors.push(FieldError::new(DraftField::Price, "Price must be greater than 0"));
                None
            }
            None => {
                errors.push(FieldError::new(DraftField::Price, "Price must be a number"));
                None
            }
        };

        let rarity = required(&self.rarity, DraftField::Rarity, &mut errors);
        let condition = required(&self.condition, DraftField::Condition, &mut errors);
        let card_type = required(&self.card_type, DraftField::CardType, &mut errors);

        let hosted = self.hosted_images();
        let total = hosted.len() + self.uploads.len();
        if total == 0 {
            let message = match purpose {
                DraftPurpose::Create => "At least one image is required",
                DraftPurpose::Edit => "Keep an existing image or add a new one",
            };
            errors.push(FieldError::new(DraftField::Images, message));
        } else if total > MAX_ADDITIONAL_IMAGES + 1 {
            errors.push(FieldError::new(
                DraftField::Images,
                format!(
                    "At most {} images besides the primary image",
                    MAX_ADDITIONAL_IMAGES
                ),
            ));
        }

        match (price, rarity, condition, card_type) {
            (Some(price), Some(rarity), Some(condition), Some(card_type)) if errors.is_empty() => {
                Ok(ValidatedDraft {
                    title: title.to_string(),
                    description: self.description.trim().to_string(),
                    price,
                    rarity,
                    condition,
                    card_type,
                    images: hosted,
                    uploads: self.uploads.clone(),
                })
            }
            _ => Err(DraftError::Fields(errors)),
        }
    }
}

fn required<T: Clone>(value: &Option<T>, field: DraftField, errors: &mut Vec<FieldError>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::new(field, format!("{} is required", field)));
    }
    value.clone()
}

fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// A draft that passed validation, ready to send.
///
/// `images` holds hosted URLs (primary first, then existing additional
/// images); `uploads` follow them in the final order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub rarity: Rarity,
    pub condition: CardCondition,
    pub card_type: CardType,
    pub images: Vec<String>,
    pub uploads: Vec<ImageUpload>,
}

impl ValidatedDraft {
    /// JSON metadata for the multipart `data` part.
    pub fn metadata(&self) -> ListingData {
        ListingData {
            listing_title: self.title.clone(),
            card_condition: self.condition.as_str().to_string(),
            card_type: self.card_type.as_str().to_string(),
            rarity: self.rarity.as_str().to_string(),
            images: self.images.clone(),
            price: self.price,
            description: self.description.clone(),
        }
    }

    /// Copy the edited fields onto a cached listing.
    ///
    /// Only hosted images are applied; uploaded files get their URLs from
    /// the next fetch.
    pub fn apply_to(&self, listing: &mut Listing) {
        listing.title = self.title.clone();
        listing.description = self.description.clone();
        listing.price = self.price;
        listing.rarity = self.rarity.clone();
        listing.condition = self.condition.clone();
        listing.card_type = self.card_type.clone();
        if let Some((primary, rest)) = self.images.split_first() {
            listing.image_url = primary.clone();
            listing.additional_images = rest.to_vec();
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Price,
    Rarity,
    Condition,
    CardType,
    Images,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Title => "Title",
            DraftField::Price => "Price",
            DraftField::Rarity => "Rarity",
            DraftField::Condition => "Condition",
            DraftField::CardType => "Card type",
            DraftField::Images => "Images",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("listing draft has {} invalid field(s)", .0.len())]
    Fields(Vec<FieldError>),
}

impl DraftError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            DraftError::Fields(fields) => fields,
        }
    }

    /// Message for one field, for showing next to its input.
    pub fn message_for(&self, field: DraftField) -> Option<&str> {
        self.fields()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ListingDraft {
        ListingDraft {
            title: "Mewtwo EX".to_string(),
            description: "Near mint".to_string(),
            price: "12.50".to_string(),
            rarity: Some(Rarity::DoubleRare),
            condition: Some(CardCondition::LikeNew),
            card_type: Some(CardType::PokemonCard),
            primary_image: None,
            existing_images: Vec::new(),
            uploads: vec![ImageUpload::new("front.png", "image/png", vec![1, 2, 3])],
        }
    }

    #[test]
    fn test_valid_create_draft() {
        let validated = complete_draft().validate(DraftPurpose::Create).unwrap();
        assert_eq!(validated.price, Decimal::new(1250, 2));
        assert!(validated.images.is_empty());
        assert_eq!(validated.uploads.len(), 1);
        let data = validated.metadata();
        assert_eq!(data.card_condition, "Like New");
        assert_eq!(data.rarity, "Double Rare");
    }

    #[test]
    fn test_price_must_be_positive_number() {
        for raw in ["", "abc", "0", "-3", "NaN"] {
            let mut draft = complete_draft();
            draft.price = raw.to_string();
            let err = draft.validate(DraftPurpose::Create).unwrap_err();
            assert!(err.message_for(DraftField::Price).is_some(), "{raw}");
        }
    }

    #[test]
    fn test_create_requires_an_image() {
        let mut draft = complete_draft();
        draft.uploads.clear();
        let err = draft.validate(DraftPurpose::Create).unwrap_err();
        assert_eq!(err.fields().len(), 1);
        assert_eq!(err.fields()[0].field, DraftField::Images);
    }

    #[test]
    fn test_edit_satisfied_by_existing_image() {
        let mut draft = complete_draft();
        draft.uploads.clear();
        draft.primary_image = Some("https://img/p.png".to_string());
        let validated = draft.validate(DraftPurpose::Edit).unwrap();
        assert_eq!(validated.images, vec!["https://img/p.png"]);
    }

    #[test]
    fn test_image_limit() {
        let mut draft = complete_draft();
        draft.primary_image = Some("https://img/p.png".to_string());
        draft.existing_images = (0..5).map(|i| format!("https://img/{i}.png")).collect();
        assert!(draft.validate(DraftPurpose::Edit).is_err());
        draft.uploads.clear();
        assert!(draft.validate(DraftPurpose::Edit).is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let draft = ListingDraft::default();
        let err = draft.validate(DraftPurpose::Create).unwrap_err();
        assert_eq!(err.fields().len(), 6);
        assert_eq!(err.to_string(), "listing draft has 6 invalid field(s)");
    }

    #[test]
    fn test_image_order_primary_existing_uploads() {
        let mut draft = complete_draft();
        draft.primary_image = Some("p".to_string());
        draft.existing_images = vec!["a".to_string(), "b".to_string()];
        let validated = draft.validate(DraftPurpose::Edit).unwrap();
        assert_eq!(validated.images, vec!["p", "a", "b"]);
        assert_eq!(validated.uploads[0].file_name, "front.png");
    }

    #[test]
    fn test_removing_primary_promotes_next_image() {
        let mut draft = complete_draft();
        draft.primary_image = Some("p".to_string());
        draft.existing_images = vec!["a".to_string(), "b".to_string()];
        draft.remove_existing_image("p");
        assert_eq!(draft.primary_image.as_deref(), Some("a"));
        assert_eq!(draft.existing_images, vec!["b"]);
    }
}
