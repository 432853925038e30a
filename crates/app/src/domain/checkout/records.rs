//! Checkout Records

use readitagain::checkout::CheckoutSummary;

use crate::domain::carts::records::SellerCart;

/// The amounts an order would be placed with, next to the lines they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPreview {
    pub cart: SellerCart,
    pub summary: CheckoutSummary,
}
