//! Errors

use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::addresses::AddressesServiceError;

pub(crate) fn into_status_error(error: AddressesServiceError) -> StatusError {
    match error {
        AddressesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Address already exists")
        }
        AddressesServiceError::NotFound => StatusError::not_found().brief("Address not found"),
        AddressesServiceError::InvalidReference
        | AddressesServiceError::MissingRequiredData
        | AddressesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid address payload")
        }
        AddressesServiceError::Sql(source) => {
            error!("addresses storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
