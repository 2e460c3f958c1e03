//! Listing domain: cards for sale, paged result caches, active/sold tabs.

pub mod attributes;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod draft;
pub mod state;
pub mod tabs;
pub mod wire;

use crate::shared::{ListingId, PaginationMeta};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use attributes::{CardCondition, CardType, ListingStatus, Rarity, Region};
pub use draft::{DraftError, DraftField, DraftPurpose, FieldError, ImageUpload, ListingDraft, ValidatedDraft};
pub use state::{FetchTicket, PagedResultCache};
pub use tabs::{ListingTabs, Tab};

/// Most images a listing may carry besides its primary image.
pub const MAX_ADDITIONAL_IMAGES: usize = 5;

// ─── Listing ─────────────────────────────────────────────────────────────────

/// A validated card listing.
///
/// `price > 0` and `additional_images.len() <= MAX_ADDITIONAL_IMAGES` hold for
/// every value produced by the wire conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub additional_images: Vec<String>,
    pub rarity: Rarity,
    pub condition: CardCondition,
    pub card_type: CardType,
    pub seller_id: Option<String>,
    pub seller_name: String,
    pub seller_region: Option<Region>,
    pub status: ListingStatus,
    /// Whether the current viewer has this listing on their wishlist.
    pub in_cart: bool,
    pub listed_on: Option<NaiveDateTime>,
}

impl Listing {
    pub fn is_sold(&self) -> bool {
        self.status == ListingStatus::Sold
    }

    /// Primary image followed by the additional images.
    pub fn all_images(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image_url.as_str())
            .filter(|url| !url.is_empty())
            .chain(self.additional_images.iter().map(String::as_str))
    }

    /// What the seller receives after the rarity-based platform fee.
    pub fn seller_payout(&self) -> Decimal {
        self.price - self.price * self.rarity.platform_fee_rate()
    }
}

// ─── ListingPage ─────────────────────────────────────────────────────────────

/// One page of listings as returned by a search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub pagination: PaginationMeta,
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingTitle,
    NonPositivePrice(Decimal),
    MissingImage,
    TooManyImages(usize),
    InvalidStatus(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Listing validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingTitle => write!(f, "Missing title"),
            ValidationError::NonPositivePrice(p) => write!(f, "Price must be positive, got {p}"),
            ValidationError::MissingImage => write!(f, "Missing primary image"),
            ValidationError::TooManyImages(n) => write!(
                f,
                "At most {MAX_ADDITIONAL_IMAGES} additional images allowed, got {n}"
            ),
            ValidationError::InvalidStatus(s) => write!(f, "Invalid status: {s}"),
        }
    }
}

impl std::error::Error for ValidationError {}
