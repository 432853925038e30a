//! Delete Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{books::errors::into_status_error, extensions::*, state::State};

/// Delete Book Handler
///
/// Removes a listing that is still on sale.
#[endpoint(
    tags("seller"),
    summary = "Delete a Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Book deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::CONFLICT, description = "Book already ordered or sold"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    state
        .app
        .books
        .delete_book(seller, book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
