//! Errors

use readitagain_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username or email already registered")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Incorrect username or password")
        }
        AuthServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::Invalid(reason) => StatusError::bad_request().brief(reason.to_string()),
        AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid registration payload")
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process access token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Task(source) => {
            error!("password task failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
