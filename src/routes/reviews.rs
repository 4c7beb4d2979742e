use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use super::{not_blank, ValidatedJson};
use crate::auth::{AdminOrManager, CustomerOnly, Session};
use crate::controllers::reviews as controller;
use crate::domain::aggregates::Review;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", delete(delete_all_reviews))
        .route("/:model", post(add_review).get(get_product_reviews).delete(delete_review))
        .route("/:model/all", delete(delete_reviews_of_product))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub score: u8,
    #[validate(custom = "not_blank")]
    pub comment: String,
}

async fn add_review(
    CustomerOnly(customer): CustomerOnly,
    State(s): State<AppState>,
    Path(model): Path<String>,
    ValidatedJson(r): ValidatedJson<ReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = controller::add_review(&s, &customer, &model, r.score, r.comment).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn get_product_reviews(_session: Session, State(s): State<AppState>, Path(model): Path<String>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(controller::get_product_reviews(&s, &model).await?))
}

async fn delete_review(
    CustomerOnly(customer): CustomerOnly,
    State(s): State<AppState>,
    Path(model): Path<String>,
) -> Result<StatusCode, AppError> {
    controller::delete_review(&s, &customer, &model).await?;
    Ok(StatusCode::OK)
}

async fn delete_reviews_of_product(
    AdminOrManager(_): AdminOrManager,
    State(s): State<AppState>,
    Path(model): Path<String>,
) -> Result<StatusCode, AppError> {
    controller::delete_reviews_of_product(&s, &model).await?;
    Ok(StatusCode::OK)
}

async fn delete_all_reviews(AdminOrManager(_): AdminOrManager, State(s): State<AppState>) -> Result<StatusCode, AppError> {
    controller::delete_all_reviews(&s).await?;
    Ok(StatusCode::OK)
}
