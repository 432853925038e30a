//! Request Cancellation Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, parse_party},
    },
    state::State,
};

/// Cancellation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancellationRequest {
    #[serde(default)]
    pub reason: String,
}

/// Request Cancellation Handler
///
/// Asks the other party to cancel an order that is still to ship or shipping.
#[endpoint(
    tags("orders"),
    summary = "Request Cancellation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cancellation requested"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order cannot be cancelled"),
    ),
)]
pub(crate) async fn handler(
    person: PathParam<String>,
    order_id: PathParam<Uuid>,
    json: JsonBody<CancellationRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let party = parse_party(&person.into_inner())?;

    let order = state
        .app
        .orders
        .request_cancellation(
            member,
            party,
            order_id.into_inner().into(),
            json.into_inner().reason.trim().to_string(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
