//! Order request and response models

use readitagain::orders::{OrderStatusFilter, Party};
use readitagain_app::domain::orders::records::{OrderLine, OrderRecord};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extensions::*;

/// Parse the `{person}` path segment.
pub(crate) fn parse_party(person: &str) -> Result<Party, StatusError> {
    person
        .parse::<Party>()
        .or_400("Person must be seller or customer")
}

/// Parse the optional `?status=` filter, defaulting to every order.
pub(crate) fn parse_status_filter(
    status: Option<String>,
) -> Result<OrderStatusFilter, StatusError> {
    Ok(status
        .map(|value| value.parse::<OrderStatusFilter>())
        .transpose()
        .or_400("Invalid status filter")?
        .unwrap_or_default())
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub book_uuid: Uuid,
    pub isbn: String,
    pub name: String,
    pub price: u64,
    pub state: String,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            book_uuid: line.book_uuid.into(),
            isbn: line.isbn,
            name: line.name,
            price: line.price,
            state: line.state.label().to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub seller_uuid: Uuid,
    pub customer_uuid: Uuid,

    /// `To ship`, `Shipping`, `Completed`, `Cancelling` or `Cancelled`
    pub status: String,
    pub shipping_method: String,
    pub shipping_fee: u64,
    pub books_total: u64,
    pub discount_amount: u64,
    pub total_amount: u64,
    pub total_count: u32,

    /// Who asked to cancel, while a request is pending or after it was accepted
    pub cancel_requested_by: Option<String>,
    pub cancel_reason: Option<String>,
    pub cancel_reply: Option<String>,
    pub stars: Option<u8>,
    pub comment: Option<String>,
    pub coupon_codes: Vec<String>,
    pub books: Vec<OrderLineResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            seller_uuid: order.seller_uuid.into(),
            customer_uuid: order.customer_uuid.into(),
            status: order.status.label().to_string(),
            shipping_method: order.shipping_method.label().to_string(),
            shipping_fee: order.shipping_fee,
            books_total: order.books_total,
            discount_amount: order.discount_amount,
            total_amount: order.total_amount,
            total_count: order.total_count,
            cancel_requested_by: order.cancel_requested_by.map(|party| party.to_string()),
            cancel_reason: order.cancel_reason,
            cancel_reply: order.cancel_reply,
            stars: order.stars.map(|stars| stars.get()),
            comment: order.comment,
            coupon_codes: order.coupon_codes,
            books: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            orders: orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use readitagain::orders::{OrderStatus, Stars};
    use readitagain_app::domain::orders::records::OrderUuid;
    use testresult::TestResult;

    use super::{fixtures::make_order, *};

    #[test]
    fn response_uses_labels() -> TestResult {
        let mut order = make_order(OrderUuid::new(), OrderStatus::Completed);

        order.stars = Some(Stars::new(4)?);
        order.cancel_requested_by = Some(Party::Customer);

        let response = OrderResponse::from(order);

        assert_eq!(response.status, "Completed");
        assert_eq!(response.shipping_method, "7-ELEVEN");
        assert_eq!(response.stars, Some(4));
        assert_eq!(response.cancel_requested_by.as_deref(), Some("customer"));
        assert_eq!(response.books[0].state, "ordered");

        Ok(())
    }

    #[test]
    fn person_segment_is_case_insensitive() -> TestResult {
        assert_eq!(parse_party("Seller")?, Party::Seller);
        assert!(parse_party("courier").is_err(), "unknown person should be rejected");

        Ok(())
    }
}
