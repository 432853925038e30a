//! Add To Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    pub book_uuid: Uuid,
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub book_uuid: Uuid,
}

/// Add To Cart Handler
///
/// Puts an on-sale book listed by another member into the caller's cart.
#[endpoint(
    tags("carts"),
    summary = "Add Book to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Book is your own listing"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::CONFLICT, description = "Book already in cart or not on sale"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.member_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_book(customer, json.into_inner().book_uuid.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartItemResponse {
        uuid: item.uuid.into(),
        book_uuid: item.book_uuid.into(),
    }))
}
