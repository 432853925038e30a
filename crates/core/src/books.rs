//! Book listing states.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::labels::UnknownLabel;

/// Listing state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookState {
    /// Listed and purchasable.
    #[serde(rename = "on sale")]
    OnSale,

    /// Claimed by an order that has not completed.
    #[serde(rename = "ordered")]
    Ordered,

    /// Delivered.
    #[serde(rename = "sold")]
    Sold,
}

impl BookState {
    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnSale => "on sale",
            Self::Ordered => "ordered",
            Self::Sold => "sold",
        }
    }

    /// Whether the seller may still edit or withdraw the listing.
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::OnSale)
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookState {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "on sale" => Ok(Self::OnSale),
            "ordered" => Ok(Self::Ordered),
            "sold" => Ok(Self::Sold),
            _ => Err(UnknownLabel::new("book state", value)),
        }
    }
}

/// Seller dashboard book filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookFilter {
    /// Every listing.
    #[default]
    All,

    /// Listings in a given state.
    State(BookState),

    /// Listings without any picture.
    NoPicture,
}

impl FromStr for BookFilter {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace(' ', "_").as_str() {
            "all" => Ok(Self::All),
            "on_sale" => Ok(Self::State(BookState::OnSale)),
            "ordered" => Ok(Self::State(BookState::Ordered)),
            "sold" => Ok(Self::State(BookState::Sold)),
            "no_picture" => Ok(Self::NoPicture),
            _ => Err(UnknownLabel::new("book filter", value)),
        }
    }
}
