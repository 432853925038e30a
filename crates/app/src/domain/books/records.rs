//! Book Records

use jiff::Timestamp;
use readitagain::{books::BookState, checkout::CheckoutLine, shipping::ShippingMethod};

use crate::{
    domain::{members::records::MemberUuid, orders::records::OrderUuid},
    uuids::TypedUuid,
};

/// Book UUID
pub type BookUuid = TypedUuid<BookRecord>;

/// Book Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub uuid: BookUuid,
    pub seller_uuid: MemberUuid,
    pub order_uuid: Option<OrderUuid>,
    pub discount_code: Option<String>,
    pub isbn: String,
    pub name: String,
    pub condition: String,
    pub price: u64,
    pub shipping_location: String,
    pub shipping_method: ShippingMethod,
    pub description: String,
    pub category: String,
    pub state: BookState,

    /// Picture file names, in upload order.
    pub pictures: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BookRecord {
    /// The pricing view of this book used at checkout.
    #[must_use]
    pub fn checkout_line(&self) -> CheckoutLine {
        CheckoutLine {
            price: self.price,
            discount_code: self.discount_code.clone(),
        }
    }
}

/// Book Picture UUID
pub type BookPictureUuid = TypedUuid<BookPictureRecord>;

/// Book Picture Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPictureRecord {
    pub uuid: BookPictureUuid,
    pub book_uuid: BookUuid,
    pub path: String,
    pub position: i32,
    pub created_at: Timestamp,
}
