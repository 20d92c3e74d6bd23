//! Query-string extractor with 400 rejections.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::Query;
use serde::de::DeserializeOwned;

use common::AppError;

/// Query parameters where repeated keys collect into `Vec`s.
///
/// Unknown or malformed parameters are reported in the usual error body
/// instead of axum's plain-text rejection.
pub struct StrictQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for StrictQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.to_string()))?;
        Ok(StrictQuery(value))
    }
}
