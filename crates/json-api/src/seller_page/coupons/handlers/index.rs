//! Coupon Index Handler

use std::sync::Arc;

use jiff::Timestamp;
use readitagain::coupons::PhaseFilter;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    seller_page::coupons::{
        errors::into_status_error,
        models::{CouponResponse, CouponsResponse},
    },
    state::State,
};

/// Coupon Index Handler
///
/// Lists your coupons, optionally only the `ongoing`, `upcoming` or `expired` ones.
#[endpoint(
    tags("seller"),
    summary = "List My Coupons",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    phase: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;
    let now = Timestamp::now();

    let filter = phase
        .into_inner()
        .map(|value| value.parse::<PhaseFilter>())
        .transpose()
        .or_400("Invalid phase")?
        .unwrap_or_default();

    let coupons = state
        .app
        .coupons
        .list_coupons(seller, filter, now)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsResponse {
        coupons: coupons
            .into_iter()
            .map(|coupon| CouponResponse::at(coupon, now))
            .collect(),
    }))
}
