//! Advance Order Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, parse_party},
    },
    state::State,
};

/// Advance Order Status Handler
///
/// Sellers ship and complete orders; customers confirm receipt of shipped
/// orders. Completing an order marks its books sold.
#[endpoint(
    tags("orders"),
    summary = "Advance Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order advanced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown person"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order cannot advance from its status"),
    ),
)]
pub(crate) async fn handler(
    person: PathParam<String>,
    order_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let party = parse_party(&person.into_inner())?;

    let order = state
        .app
        .orders
        .advance_status(member, party, order_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
