use crate::app_errors::{error_response, ErrorKind};
use crate::utils::notifications::errors::NotificationError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,
    #[error("You can't follow/unfollow yourself")]
    SelfFollow,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Please provide both current and new password")]
    MissingPassword,
    #[error("Current password is incorrect")]
    WrongPassword,
    #[error("Password is too weak")]
    WeakPassword,
    #[error("Invalid user data: {0}")]
    InvalidUserData(#[from] ValidationErrors),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::UserNotFound => ErrorKind::NotFound,
            UserError::UsernameTaken => ErrorKind::Conflict,
            UserError::SelfFollow
            | UserError::MissingPassword
            | UserError::WrongPassword
            | UserError::WeakPassword
            | UserError::InvalidUserData(_) => ErrorKind::Validation,
            UserError::Notification(e) => e.kind(),
            UserError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

impl From<sqlx::Error> for UserError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}
