//! Card attribute enums: rarity, condition, card type, seller region.
//!
//! Each enum serializes as the backend's display name (`"Hyper Rare"`,
//! `"Brand New"`, ...). Values the client does not know are kept verbatim in
//! an `Other` variant rather than rejected, so a listing carrying a newer
//! backend value still renders and still sorts (see [`Rarity::tier`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! display_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $display:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            /// A value the backend sent that this client does not recognise.
            Other(String),
        }

        impl $name {
            /// Every known value, in declaration order.
            pub fn known() -> Vec<$name> {
                vec![$( $name::$variant ),+]
            }

            /// Backend display name.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $display, )+
                    $name::Other(s) => s.as_str(),
                }
            }

            /// Case-insensitive lookup by display name; unknown names become `Other`.
            pub fn from_display(s: &str) -> Self {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($display)
                        $( || trimmed.eq_ignore_ascii_case($alias) )*
                    {
                        return $name::$variant;
                    }
                )+
                $name::Other(trimmed.to_string())
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::from_display(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok($name::from_display(&s))
            }
        }
    };
}

display_enum! {
    /// Card rarity. Declaration order is the tier order, lowest first.
    pub enum Rarity {
        Common => "Common",
        Uncommon => "Uncommon",
        Rare => "Rare",
        DoubleRare => "Double Rare",
        IllustrationRare => "Illustration Rare",
        SpecialIllustrationRare => "Special Illustration Rare",
        HyperRare => "Hyper Rare",
    }
}

display_enum! {
    /// Physical card condition. Declaration order is the tier order, worst first.
    pub enum CardCondition {
        Damaged => "Damage" | "Damaged",
        HeavilyUsed => "Heavily Used",
        WellUsed => "Well Used",
        LightlyUsed => "Lightly Used",
        LikeNew => "Like New",
        BrandNew => "Brand New",
    }
}

display_enum! {
    /// Kind of card being sold.
    pub enum CardType {
        PokemonCard => "Pokemon Card",
        TrainerCard => "Trainer Card",
    }
}

display_enum! {
    /// Seller region.
    pub enum Region {
        Central => "Central Region",
        North => "North Region",
        East => "East Region",
        NorthEast => "North East Region",
        West => "West Region",
    }
}

/// Rarity tiers, lowest to highest.
pub static RARITY_TIERS: [Rarity; 7] = [
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::DoubleRare,
    Rarity::IllustrationRare,
    Rarity::SpecialIllustrationRare,
    Rarity::HyperRare,
];

/// Condition tiers, lowest to highest.
pub static CONDITION_TIERS: [CardCondition; 6] = [
    CardCondition::Damaged,
    CardCondition::HeavilyUsed,
    CardCondition::WellUsed,
    CardCondition::LightlyUsed,
    CardCondition::LikeNew,
    CardCondition::BrandNew,
];

/// Index of `value` in a tier table, or `-1` when it is not listed.
///
/// Unknown values therefore rank below every known tier.
pub fn tier_index<T: PartialEq>(tiers: &[T], value: &T) -> i32 {
    tiers
        .iter()
        .position(|t| t == value)
        .map(|i| i as i32)
        .unwrap_or(-1)
}

impl Rarity {
    /// Position in [`RARITY_TIERS`]; `-1` for unknown rarities.
    pub fn tier(&self) -> i32 {
        tier_index(&RARITY_TIERS, self)
    }

    /// Platform fee rate the marketplace takes on a sale at this rarity.
    pub fn platform_fee_rate(&self) -> Decimal {
        match self {
            Rarity::IllustrationRare => Decimal::new(25, 3),
            Rarity::SpecialIllustrationRare => Decimal::new(5, 2),
            Rarity::HyperRare => Decimal::new(10, 2),
            _ => Decimal::ZERO,
        }
    }
}

impl CardCondition {
    /// Position in [`CONDITION_TIERS`]; `-1` for unknown conditions.
    pub fn tier(&self) -> i32 {
        tier_index(&CONDITION_TIERS, self)
    }
}

// ─── ListingStatus ───────────────────────────────────────────────────────────

/// Sale status of a listing. A listing is in exactly one status at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Sold => "Sold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(ListingStatus::Active),
            "sold" => Some(ListingStatus::Sold),
            _ => None,
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
