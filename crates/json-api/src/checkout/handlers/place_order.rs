//! Place Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    checkout::{errors::into_status_error, models::CheckoutRequest},
    extensions::*,
    orders::models::OrderResponse,
    state::State,
};

/// Place Order Handler
///
/// Turns the cart with one seller into an order. The books are marked ordered,
/// the coupons are frozen and the cart lines are removed. If another customer
/// ordered one of the books first, nothing is written.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon selection not applicable"),
        (status_code = StatusCode::NOT_FOUND, description = "No books from this seller in cart"),
        (status_code = StatusCode::CONFLICT, description = "A book was ordered concurrently"),
    ),
)]
pub(crate) async fn handler(
    seller_id: PathParam<Uuid>,
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let order = state
        .app
        .checkout
        .place_order(
            customer,
            seller_id.into_inner().into(),
            json.into_inner().try_into()?,
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
