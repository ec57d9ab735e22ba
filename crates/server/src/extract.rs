//! Extractors whose rejections go through `ApiError`, so malformed bodies,
//! ids and query strings all answer with the usual `{message}` shape.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::ApiError;

/// JSON body; any parse or content-type failure is a 400.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e.body_text())))?;
        Ok(JsonBody(value))
    }
}

/// The `:id` path segment as a UUID.
pub struct EntityId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("Invalid id format"))?;
        Ok(EntityId(id))
    }
}

/// Query-string filters.
pub struct QueryFilter<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryFilter<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e.body_text())))?;
        Ok(QueryFilter(value))
    }
}
