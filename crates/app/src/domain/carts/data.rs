//! Cart Data

use crate::domain::{books::records::BookUuid, carts::records::CartItemUuid};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub book_uuid: BookUuid,
}
