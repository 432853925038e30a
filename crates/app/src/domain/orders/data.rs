//! Order Data

use readitagain::{checkout::CheckoutSummary, shipping::ShippingMethod};

use crate::domain::{members::records::MemberUuid, orders::records::OrderUuid};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub seller_uuid: MemberUuid,
    pub customer_uuid: MemberUuid,
    pub shipping_method: ShippingMethod,
    pub summary: CheckoutSummary,
}
