//! Errors

use readitagain::checkout::CheckoutError;
use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::checkout::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::Conflict => StatusError::conflict()
            .brief("A book in your cart was ordered by someone else, please review your cart"),
        CheckoutServiceError::Rules(CheckoutError::EmptyCart) => {
            StatusError::not_found().brief("Your cart has no books from this seller")
        }
        CheckoutServiceError::Rules(CheckoutError::Discount(source)) => {
            error!("checkout arithmetic error: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Rules(reason) => StatusError::bad_request().brief(reason.to_string()),
        CheckoutServiceError::NotFound => StatusError::not_found().brief("Seller not found"),
        CheckoutServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        CheckoutServiceError::InvalidReference
        | CheckoutServiceError::MissingRequiredData
        | CheckoutServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid checkout payload")
        }
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
