//! Create Book Handler

use std::sync::Arc;

use readitagain_app::domain::books::{data::NewBook, records::BookUuid};
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    books::{errors::into_status_error, models::BookResponse},
    extensions::*,
    seller_page::books::models::BookRequest,
    state::State,
};

/// Create Book Handler
///
/// Lists a book for sale.
#[endpoint(
    tags("seller"),
    summary = "List a Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid listing"),
        (status_code = StatusCode::CONFLICT, description = "ISBN already listed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let book = NewBook {
        uuid: BookUuid::new(),
        details: json.into_inner().try_into()?,
    };

    let book = state
        .app
        .books
        .create_book(seller, book)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/books/{}", book.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(book.into()))
}
