//! Errors

use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Book is already in your cart")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Book not found"),
        CartsServiceError::OwnBook => StatusError::bad_request().brief("You cannot buy your own book"),
        CartsServiceError::NotOnSale { state } => {
            StatusError::conflict().brief(format!("Book is {state}, not on sale"))
        }
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("carts storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
