use crate::utils::auth::errors::AuthError;
use crate::utils::notifications::errors::NotificationError;
use crate::utils::posts::errors::PostError;
use crate::utils::search::errors::SearchError;
use crate::utils::users::errors::UserError;
use crate::utils::vacations::errors::VacationError;
use anyhow::Context;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Coarse classification every domain error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    Validation,
    Unauthorized,
    Unexpected,
}

impl From<ErrorKind> for StatusCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Conflict | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Renders `{ "error": ... }`, hiding the message of unexpected errors.
pub fn error_response(kind: ErrorKind, error: &(dyn std::error::Error + 'static)) -> Response {
    let info = match kind {
        ErrorKind::Unexpected => {
            tracing::error!("Internal server error: {error:?}");
            "Unexpected server error".to_string()
        }
        _ => error.to_string(),
    };

    (StatusCode::from(kind), Json(json!({ "error": info }))).into_response()
}

pub trait DefaultContext<T> {
    fn dc(self) -> anyhow::Result<T>;
}

impl<T, E> DefaultContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn dc(self) -> anyhow::Result<T> {
        self.context("Unexpected error")
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Vacation(#[from] VacationError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(e) => e.into_response(),
            AppError::Vacation(e) => e.into_response(),
            AppError::Notification(e) => e.into_response(),
            AppError::User(e) => e.into_response(),
            AppError::Post(e) => e.into_response(),
            AppError::Search(e) => e.into_response(),
        }
    }
}
