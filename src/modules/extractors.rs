use crate::app_errors::{error_response, ErrorKind};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use http::request::Parts;
use http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Malformed request input: bad JSON, missing fields, unparsable path or query values.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

/// [`Json`] whose rejection renders as a `{ "error": ... }` validation error.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for JsonBody<T>
where
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = RequestError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// [`Path`] whose rejection renders as a `{ "error": ... }` validation error.
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// [`Query`] whose rejection renders as a `{ "error": ... }` validation error.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Invite {
        #[allow(dead_code)]
        username: String,
    }

    #[tokio::test]
    async fn missing_field_is_json_validation_error() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let rejection = JsonBody::<Invite>::from_request(req, &())
            .await
            .err()
            .unwrap();

        assert!(rejection.to_string().contains("username"));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_validation_error() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{\"username\":"))
            .unwrap();
        let rejection = JsonBody::<Invite>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
