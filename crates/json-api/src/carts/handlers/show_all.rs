//! Show Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartResponse, SellerCartResponse},
    },
    extensions::*,
    state::State,
};

/// Show Cart Handler
///
/// Returns the whole cart grouped by seller.
#[endpoint(tags("carts"), summary = "Show Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let sellers = state
        .app
        .carts
        .show_cart(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        sellers: sellers.into_iter().map(SellerCartResponse::from).collect(),
    }))
}
