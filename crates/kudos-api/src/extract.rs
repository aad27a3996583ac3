//! Request extractors that turn malformed input into `ApiError` before a
//! handler runs.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, INVALID_BOARD_ID, INVALID_ID};

/// The single `{id}` path segment of a record route, parsed as an integer.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

/// The `{id}` segment of `/boards/{id}/cards`; it has its own error message.
#[derive(Debug, Clone, Copy)]
pub struct BoardId(pub i64);

async fn parse_id<S>(parts: &mut Parts, state: &S, message: &'static str) -> Result<i64, ApiError>
where
    S: Send + Sync,
{
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::InvalidId(message))?;
    raw.trim().parse().map_err(|_| ApiError::InvalidId(message))
}

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_id(parts, state, INVALID_ID).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for BoardId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_id(parts, state, INVALID_BOARD_ID).await.map(Self)
    }
}

/// `axum::Json` with its rejections mapped to a 400 `ApiError`. A body sent
/// without a JSON content type is read as an empty payload, so every
/// required field is reported instead of a parse error.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(T::default())),
            Err(rejection) => Err(rejection.into()),
        }
    }
}
