//! Get Order Handler

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

/// Get Order Handler
///
/// Returns one order you take part in as `person`.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
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
        .get_order(member, party, order_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
