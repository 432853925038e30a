//! Checkout Preview Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    checkout::{
        errors::into_status_error,
        models::{CheckoutRequest, PreviewResponse},
    },
    extensions::*,
    state::State,
};

/// Checkout Preview Handler
///
/// Prices the cart with one seller for the chosen shipping method and coupons.
/// Nothing is written.
#[endpoint(
    tags("checkout"),
    summary = "Preview Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon selection not applicable"),
        (status_code = StatusCode::NOT_FOUND, description = "No books from this seller in cart"),
    ),
)]
pub(crate) async fn handler(
    seller_id: PathParam<Uuid>,
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<PreviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let preview = state
        .app
        .checkout
        .preview(
            customer,
            seller_id.into_inner().into(),
            json.into_inner().try_into()?,
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(preview.into()))
}
