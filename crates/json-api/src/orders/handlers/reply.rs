//! Reply To Cancellation Handler

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

/// Cancellation Reply
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancellationReply {
    pub accept: bool,

    #[serde(default)]
    pub message: String,
}

/// Reply To Cancellation Handler
///
/// The party that did not ask answers a pending request. Accepting cancels
/// the order and puts its books back on sale; denying restores the previous
/// status.
#[endpoint(
    tags("orders"),
    summary = "Reply to Cancellation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Reply recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "You asked for the cancellation"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "No cancellation is pending"),
    ),
)]
pub(crate) async fn handler(
    person: PathParam<String>,
    order_id: PathParam<Uuid>,
    json: JsonBody<CancellationReply>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let member = depot.member_uuid_or_401()?;

    let party = parse_party(&person.into_inner())?;
    let reply = json.into_inner();

    let order = state
        .app
        .orders
        .reply_cancellation(
            member,
            party,
            order_id.into_inner().into(),
            reply.accept,
            reply.message.trim().to_string(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
