//! Update Book Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    books::{errors::into_status_error, models::BookResponse},
    extensions::*,
    seller_page::books::models::BookRequest,
    state::State,
};

/// Update Book Handler
///
/// Edits a listing that is still on sale.
#[endpoint(
    tags("seller"),
    summary = "Edit a Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::CONFLICT, description = "Book already ordered or sold"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let book = state
        .app
        .books
        .update_book(seller, book.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(book.into()))
}
