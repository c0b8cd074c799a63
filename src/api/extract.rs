//! Body and query extractors that reject with [`BookingError`].
//!
//! axum's own `Json` and `Query` reject with plain-text 400/415/422
//! responses. These wrappers route every rejection through
//! [`BookingError::InvalidRequest`] so clients always get the JSON error
//! envelope with status 400.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::extract::rejection::JsonRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::BookingError;

/// JSON request body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// URL query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
