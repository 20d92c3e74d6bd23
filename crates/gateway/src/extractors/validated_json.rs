//! JSON body extractor with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// JSON extractor that runs the payload's `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Message of the alphabetically first failing field, for stable output.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names: Vec<_> = fields.keys().collect();
    names.sort();

    names
        .first()
        .and_then(|name| fields.get(*name))
        .and_then(|errors| errors.first())
        .map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value for {}", error.code),
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}
