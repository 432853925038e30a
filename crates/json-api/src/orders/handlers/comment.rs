//! Comment On Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Comment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommentRequest {
    /// 1 to 5
    pub stars: u8,

    #[serde(default)]
    pub comment: String,
}

/// Comment On Order Handler
///
/// The customer rates a completed order once.
#[endpoint(
    tags("orders"),
    summary = "Rate an Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rating recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Stars out of range"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order not completed or already rated"),
    ),
)]
pub(crate) async fn handler(
    order_id: PathParam<Uuid>,
    json: JsonBody<CommentRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let request = json.into_inner();

    let order = state
        .app
        .orders
        .comment(
            customer,
            order_id.into_inner().into(),
            request.stars,
            request.comment.trim().to_string(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
