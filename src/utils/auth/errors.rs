use crate::app_errors::{error_response, ErrorKind};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username is already taken")]
    UserAlreadyExists,
    #[error("Missing credential")]
    MissingCredential,
    #[error("Password is too weak")]
    WeakPassword,
    #[error("Invalid user data: {0}")]
    InvalidUserData(#[from] ValidationErrors),
    #[error("Wrong username or password")]
    WrongUsernameOrPassword,
    #[error("Invalid token")]
    InvalidToken,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::MissingCredential
            | AuthError::WeakPassword
            | AuthError::InvalidUserData(_) => ErrorKind::Validation,
            AuthError::WrongUsernameOrPassword | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}
