//! Request extractors whose rejections use the JSON error body.

use crate::types::{AppError, Result};
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// `Json<T>` that rejects with 400 `{"error": ...}` instead of axum's
/// plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::InvalidInput(rejection.body_text())),
        }
    }
}

/// A positive integer `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;

        parse_id(&raw).map(ResourceId)
    }
}

pub fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid id: {}", raw)))
}

/// Ids carried in request bodies must be positive.
pub fn require_id(id: i64) -> Result<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(AppError::InvalidInput("A valid id is required".to_string()))
    }
}

/// Rejects blank required strings.
pub fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::InvalidInput(format!("{} is required", name)))
    } else {
        Ok(())
    }
}
