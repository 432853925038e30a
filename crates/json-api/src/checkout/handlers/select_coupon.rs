//! Select Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    checkout::{errors::into_status_error, models::CouponSelectionResponse},
    extensions::*,
    state::State,
};

/// Select Coupon Handler
///
/// Lists the seller's ongoing, active coupons grouped by kind. Special-event
/// coupons appear only when a book in the cart carries their code. `usable`
/// tells whether the cart currently meets the coupon's minimum.
#[endpoint(tags("checkout"), summary = "Coupons for Checkout", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    seller_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CouponSelectionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let now = Timestamp::now();

    let eligibility = state
        .app
        .checkout
        .select_coupons(customer, seller_id.into_inner().into(), now)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponSelectionResponse::at(eligibility, now)))
}
