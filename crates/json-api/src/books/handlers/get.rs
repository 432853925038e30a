//! Get Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    books::{errors::into_status_error, models::BookResponse},
    extensions::*,
    state::State,
};

/// Get Book Handler
///
/// Returns a book with its picture names.
#[endpoint(
    tags("books"),
    summary = "Get Book",
    responses(
        (status_code = StatusCode::OK, description = "Book found"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let book = state
        .app
        .books
        .get_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(book.into()))
}
