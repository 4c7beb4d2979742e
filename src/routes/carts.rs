use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use super::{not_blank, ValidatedJson};
use crate::auth::{AdminOrManager, CustomerOnly};
use crate::controllers::carts as controller;
use crate::domain::aggregates::Cart;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).patch(checkout_cart).delete(delete_all_carts))
        .route("/history", get(get_customer_carts))
        .route("/current", delete(clear_cart))
        .route("/all", get(get_all_carts))
        .route("/products/:model", delete(remove_product_from_cart))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    #[validate(custom = "not_blank")]
    pub model: String,
}

async fn get_cart(CustomerOnly(customer): CustomerOnly, State(s): State<AppState>) -> Result<Json<Cart>, AppError> {
    Ok(Json(controller::get_cart(&s, &customer).await?))
}

async fn add_to_cart(
    CustomerOnly(customer): CustomerOnly,
    State(s): State<AppState>,
    ValidatedJson(r): ValidatedJson<AddToCartRequest>,
) -> Result<StatusCode, AppError> {
    controller::add_to_cart(&s, &customer, &r.model).await?;
    Ok(StatusCode::OK)
}

async fn checkout_cart(CustomerOnly(customer): CustomerOnly, State(s): State<AppState>) -> Result<StatusCode, AppError> {
    controller::checkout_cart(&s, &customer).await?;
    Ok(StatusCode::OK)
}

async fn get_customer_carts(CustomerOnly(customer): CustomerOnly, State(s): State<AppState>) -> Result<Json<Vec<Cart>>, AppError> {
    Ok(Json(controller::get_customer_carts(&s, &customer).await?))
}

async fn remove_product_from_cart(
    CustomerOnly(customer): CustomerOnly,
    State(s): State<AppState>,
    Path(model): Path<String>,
) -> Result<StatusCode, AppError> {
    controller::remove_product_from_cart(&s, &customer, &model).await?;
    Ok(StatusCode::OK)
}

async fn clear_cart(CustomerOnly(customer): CustomerOnly, State(s): State<AppState>) -> Result<StatusCode, AppError> {
    controller::clear_cart(&s, &customer).await?;
    Ok(StatusCode::OK)
}

async fn delete_all_carts(AdminOrManager(_): AdminOrManager, State(s): State<AppState>) -> Result<StatusCode, AppError> {
    controller::delete_all_carts(&s).await?;
    Ok(StatusCode::OK)
}

async fn get_all_carts(AdminOrManager(_): AdminOrManager, State(s): State<AppState>) -> Result<Json<Vec<Cart>>, AppError> {
    Ok(Json(controller::get_all_carts(&s).await?))
}
