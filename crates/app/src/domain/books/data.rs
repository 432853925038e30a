//! Book Data

use readitagain::shipping::ShippingMethod;

use crate::domain::books::records::{BookPictureUuid, BookUuid};

/// Public search parameters. Only books on sale ever match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    /// Case-insensitive substring of the name or ISBN.
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl BookQuery {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    /// Page size after applying the default and the ceiling.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

/// Listing details a seller provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub isbn: String,
    pub name: String,
    pub condition: String,
    pub price: u64,
    pub shipping_location: String,
    pub shipping_method: ShippingMethod,

    /// Code of one of the seller's own special-event coupons.
    pub discount_code: Option<String>,
    pub description: String,
    pub category: String,
}

/// New Book Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub uuid: BookUuid,
    pub details: BookDetails,
}

/// New Book Picture Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookPicture {
    pub uuid: BookPictureUuid,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_and_caps() {
        assert_eq!(BookQuery::default().page_size(), 20);

        let query = BookQuery {
            limit: Some(500),
            ..BookQuery::default()
        };
        assert_eq!(query.page_size(), 100);

        let query = BookQuery {
            limit: Some(0),
            ..BookQuery::default()
        };
        assert_eq!(query.page_size(), 1);
    }
}
