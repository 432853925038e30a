//! Show Seller Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::SellerCartResponse},
    extensions::*,
    state::State,
};

/// Show Seller Cart Handler
///
/// Returns the cart lines sold by one seller. A seller with nothing in the
/// cart yields an empty group.
#[endpoint(tags("carts"), summary = "Show Cart for Seller", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    seller_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SellerCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .show_cart_for_seller(customer, seller_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
