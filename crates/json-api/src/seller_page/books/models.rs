//! Listing request models

use readitagain::shipping::ShippingMethod;
use readitagain_app::domain::books::data::BookDetails;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// Book Listing Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookRequest {
    pub isbn: String,
    pub name: String,
    pub condition: String,
    pub price: u64,
    pub shipping_location: String,

    /// `7-ELEVEN`, `FamilyMart`, `Hi-Life` or `Home Delivery`
    pub shipping_method: String,

    /// Code of one of your special-event coupons
    pub discount_code: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

impl TryFrom<BookRequest> for BookDetails {
    type Error = StatusError;

    fn try_from(request: BookRequest) -> Result<Self, Self::Error> {
        let shipping_method = request
            .shipping_method
            .parse::<ShippingMethod>()
            .or_400("Invalid shipping method")?;

        Ok(BookDetails {
            isbn: request.isbn.trim().to_string(),
            name: request.name.trim().to_string(),
            condition: request.condition.trim().to_string(),
            price: request.price,
            shipping_location: request.shipping_location.trim().to_string(),
            shipping_method,
            discount_code: request
                .discount_code
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty()),
            description: request.description,
            category: request.category.trim().to_string(),
        })
    }
}

#[cfg(test)]
pub(super) fn make_request(shipping_method: &str) -> BookRequest {
    BookRequest {
        isbn: "9780131103627".to_string(),
        name: "The C Programming Language".to_string(),
        condition: "Good".to_string(),
        price: 300,
        shipping_location: "Taipei".to_string(),
        shipping_method: shipping_method.to_string(),
        discount_code: Some(" SPRING ".to_string()),
        description: String::new(),
        category: "Computing".to_string(),
    }
}
