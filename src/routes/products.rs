use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{not_blank, QueryParams, ValidatedJson};
use crate::auth::{AdminOrManager, Session};
use crate::controllers::products::{self as controller, NewProduct};
use crate::domain::aggregates::Product;
use crate::domain::value_objects::{Category, ProductFilter};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_products).get(get_products).delete(delete_all_products))
        .route("/available", get(get_available_products))
        .route("/:model", patch(change_product_quantity).delete(delete_product))
        .route("/:model/sell", patch(sell_product))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "positive_price"))]
pub struct RegisterProductRequest {
    #[validate(custom = "not_blank")]
    pub model: String,
    pub category: Category,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub details: Option<String>,
    pub selling_price: f64,
    pub arrival_date: Option<NaiveDate>,
}

fn positive_price(r: &RegisterProductRequest) -> Result<(), ValidationError> {
    if r.selling_price > 0.0 { Ok(()) } else { Err(ValidationError::new("selling_price")) }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeQuantityRequest {
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub change_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SellProductRequest {
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub selling_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub grouping: Option<String>,
    pub category: Option<String>,
    pub model: Option<String>,
}

impl ProductQuery {
    fn filter(&self) -> Result<ProductFilter, AppError> {
        Ok(ProductFilter::from_query(self.grouping.as_deref(), self.category.as_deref(), self.model.as_deref())?)
    }
}

#[derive(Debug, Serialize)]
pub struct QuantityResponse {
    pub quantity: u32,
}

async fn register_products(
    AdminOrManager(_): AdminOrManager,
    State(s): State<AppState>,
    ValidatedJson(r): ValidatedJson<RegisterProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = controller::register_products(&s, NewProduct {
        model: r.model,
        category: r.category,
        quantity: r.quantity,
        details: r.details,
        selling_price: r.selling_price,
        arrival_date: r.arrival_date,
    })
    .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn change_product_quantity(
    AdminOrManager(_): AdminOrManager,
    State(s): State<AppState>,
    Path(model): Path<String>,
    ValidatedJson(r): ValidatedJson<ChangeQuantityRequest>,
) -> Result<Json<QuantityResponse>, AppError> {
    let quantity = controller::change_product_quantity(&s, &model, r.quantity, r.change_date).await?;
    Ok(Json(QuantityResponse { quantity }))
}

async fn sell_product(
    AdminOrManager(_): AdminOrManager,
    State(s): State<AppState>,
    Path(model): Path<String>,
    ValidatedJson(r): ValidatedJson<SellProductRequest>,
) -> Result<Json<QuantityResponse>, AppError> {
    let quantity = controller::sell_product(&s, &model, r.quantity, r.selling_date).await?;
    Ok(Json(QuantityResponse { quantity }))
}

async fn get_products(
    AdminOrManager(_): AdminOrManager,
    State(s): State<AppState>,
    QueryParams(q): QueryParams<ProductQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(controller::get_products(&s, &q.filter()?, false).await?))
}

async fn get_available_products(
    _session: Session,
    State(s): State<AppState>,
    QueryParams(q): QueryParams<ProductQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(controller::get_products(&s, &q.filter()?, true).await?))
}

async fn delete_product(
    AdminOrManager(_): AdminOrManager,
    State(s): State<AppState>,
    Path(model): Path<String>,
) -> Result<StatusCode, AppError> {
    controller::delete_product(&s, &model).await?;
    Ok(StatusCode::OK)
}

async fn delete_all_products(AdminOrManager(_): AdminOrManager, State(s): State<AppState>) -> Result<StatusCode, AppError> {
    controller::delete_all_products(&s).await?;
    Ok(StatusCode::OK)
}
