use crate::app_errors::{error_response, ErrorKind};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}
