use crate::app_errors::{error_response, ErrorKind};
use crate::utils::notifications::errors::NotificationError;
use crate::utils::users::errors::UserError;
use crate::validation::ValidateContentError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Post not found")]
    PostNotFound,
    #[error("You are not authorized to delete this post")]
    NotAuthor,
    #[error(transparent)]
    Invalid(#[from] ValidateContentError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl PostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::PostNotFound => ErrorKind::NotFound,
            PostError::NotAuthor => ErrorKind::Forbidden,
            PostError::Invalid(_) => ErrorKind::Validation,
            PostError::User(e) => e.kind(),
            PostError::Notification(e) => e.kind(),
            PostError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

impl From<sqlx::Error> for PostError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}
