//! Cart response models

use readitagain_app::domain::carts::records::SellerCart;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::books::models::BookResponse;

/// Seller Cart Response
///
/// The books one seller has in the cart, priced together at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SellerCartResponse {
    pub seller_uuid: Uuid,
    pub seller_name: String,
    pub books: Vec<BookResponse>,
    pub subtotal: u64,
}

impl From<SellerCart> for SellerCartResponse {
    fn from(cart: SellerCart) -> Self {
        Self {
            seller_uuid: cart.seller_uuid.into(),
            seller_name: cart.seller_name,
            books: cart
                .lines
                .into_iter()
                .map(|line| BookResponse::from(line.book))
                .collect(),
            subtotal: cart.subtotal,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub sellers: Vec<SellerCartResponse>,
}
