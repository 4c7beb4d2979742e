//! HTTP surface, mounted under `/ezelectronics`.
//!
//! Each handler lists its auth guard first, then path/query extractors, then
//! the validated body, and delegates to a controller.

pub mod carts;
pub mod products;
pub mod reviews;
pub mod sessions;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json, Router,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::state::AppState;

pub const BASE_PATH: &str = "/ezelectronics";

pub fn router() -> Router<AppState> {
    let api = Router::new()
        .nest("/users", users::routes())
        .nest("/sessions", sessions::routes())
        .nest("/products", products::routes())
        .nest("/carts", carts::routes())
        .nest("/reviews", reviews::routes());
    Router::new().nest(BASE_PATH, api)
}

/// JSON body that has been deserialized and passed its `Validate` rules.
/// Malformed or invalid bodies are rejected with 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string parameters. A query string that does not deserialize is
/// rejected with 422 like a bad body.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
