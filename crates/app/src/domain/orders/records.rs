//! Order Records

use jiff::Timestamp;
use readitagain::{
    books::BookState,
    orders::{OrderStatus, Party, PendingCancellation, Stars},
    shipping::ShippingMethod,
};

use crate::{
    domain::{books::records::BookUuid, members::records::MemberUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Amounts are the checkout snapshot and never change after placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub seller_uuid: MemberUuid,
    pub customer_uuid: MemberUuid,
    pub status: OrderStatus,
    pub shipping_method: ShippingMethod,
    pub shipping_fee: u64,
    pub books_total: u64,
    pub discount_amount: u64,
    pub total_amount: u64,
    pub total_count: u32,
    pub cancel_from_status: Option<OrderStatus>,
    pub cancel_requested_by: Option<Party>,
    pub cancel_reason: Option<String>,
    pub cancel_reply: Option<String>,
    pub stars: Option<Stars>,
    pub comment: Option<String>,

    /// Codes of the coupons applied at checkout.
    pub coupon_codes: Vec<String>,
    pub lines: Vec<OrderLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// The outstanding cancellation request, if the order is awaiting a reply.
    #[must_use]
    pub fn pending_cancellation(&self) -> Option<PendingCancellation> {
        if self.status != OrderStatus::Cancelling {
            return None;
        }

        Some(PendingCancellation {
            previous: self.cancel_from_status?,
            requested_by: self.cancel_requested_by?,
        })
    }

    /// Whether `member` acts on this order as `party`.
    #[must_use]
    pub fn involves(&self, member: MemberUuid, party: Party) -> bool {
        match party {
            Party::Seller => self.seller_uuid == member,
            Party::Customer => self.customer_uuid == member,
        }
    }
}

/// A book bought in an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub book_uuid: BookUuid,
    pub isbn: String,
    pub name: String,
    pub price: u64,
    pub state: BookState,
}
