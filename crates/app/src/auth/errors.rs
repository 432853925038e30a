//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::auth::{PasswordError, RegistrationError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("username or email already registered")]
    AlreadyExists,

    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("token is invalid or expired")]
    InvalidToken,

    #[error(transparent)]
    Invalid(#[from] RegistrationError),

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("token processing error")]
    Token(#[from] TokenError),

    #[error("password task failed")]
    Task(#[from] JoinError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
