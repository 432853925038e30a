//! Errors

use salvo::http::StatusError;
use tracing::error;

use readitagain_app::domain::members::MembersServiceError;

pub(crate) fn into_status_error(error: MembersServiceError) -> StatusError {
    match error {
        MembersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        MembersServiceError::NotFound => StatusError::not_found().brief("Member not found"),
        MembersServiceError::InvalidReference
        | MembersServiceError::MissingRequiredData
        | MembersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        MembersServiceError::Sql(source) => {
            error!("members storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
