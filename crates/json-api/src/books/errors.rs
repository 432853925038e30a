//! Errors

use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::books::BooksServiceError;

pub(crate) fn into_status_error(error: BooksServiceError) -> StatusError {
    match error {
        BooksServiceError::AlreadyExists => {
            StatusError::conflict().brief("A book with this ISBN is already listed")
        }
        BooksServiceError::NotFound => StatusError::not_found().brief("Book not found"),
        BooksServiceError::InvalidReference
        | BooksServiceError::MissingRequiredData
        | BooksServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid book payload")
        }
        BooksServiceError::Conflict { state } => {
            StatusError::conflict().brief(format!("Book is {state} and can no longer be changed"))
        }
        BooksServiceError::UnknownDiscountCode(code) => StatusError::bad_request().brief(format!(
            "Discount code {code:?} is not one of your special event coupons"
        )),
        BooksServiceError::Sql(source) => {
            error!("books storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
