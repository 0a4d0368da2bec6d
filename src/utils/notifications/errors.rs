use crate::app_errors::{error_response, ErrorKind};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification not found")]
    NotFound,
    #[error("You are not allowed to delete this notification")]
    Forbidden,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl NotificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotificationError::NotFound => ErrorKind::NotFound,
            NotificationError::Forbidden => ErrorKind::Forbidden,
            NotificationError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

impl From<sqlx::Error> for NotificationError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}
