use chrono::NaiveDate;
use tracing::info;

use crate::domain::aggregates::Product;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Category, ProductFilter};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{self, products};

pub struct NewProduct {
    pub model: String,
    pub category: Category,
    pub quantity: u32,
    pub details: Option<String>,
    pub selling_price: f64,
    pub arrival_date: Option<NaiveDate>,
}

pub async fn register_products(state: &AppState, new: NewProduct) -> Result<Product, AppError> {
    let product = Product::register(
        new.model,
        new.category,
        new.quantity,
        new.selling_price,
        new.details,
        new.arrival_date,
        state.today(),
    )?;

    let mut conn = state.db.acquire().await?;
    if !products::insert(&mut conn, &product).await? {
        return Err(AppError::ProductAlreadyExists);
    }

    info!(model = product.model(), quantity = product.quantity(), "product registered");
    state.events.publish(DomainEvent::ProductRegistered {
        model: product.model().to_string(),
        category: product.category(),
        quantity: product.quantity(),
    }).await;
    Ok(product)
}

/// Adds stock to an existing model; returns the new quantity
pub async fn change_product_quantity(state: &AppState, model: &str, quantity: u32, change_date: Option<NaiveDate>) -> Result<u32, AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let mut product = products::find(&mut tx, model).await?.ok_or(AppError::ProductNotFound)?;
    let updated = product.restock(quantity, change_date, state.today())?;
    products::set_quantity(&mut tx, model, updated).await?;
    tx.commit().await?;

    info!(model, added = quantity, quantity = updated, "product restocked");
    state.events.publish(DomainEvent::ProductRestocked { model: model.to_string(), quantity: updated }).await;
    Ok(updated)
}

/// Records a sale; returns the remaining quantity
pub async fn sell_product(state: &AppState, model: &str, quantity: u32, selling_date: Option<NaiveDate>) -> Result<u32, AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let mut product = products::find(&mut tx, model).await?.ok_or(AppError::ProductNotFound)?;
    let remaining = product.sell(quantity, selling_date, state.today())?;
    products::set_quantity(&mut tx, model, remaining).await?;
    tx.commit().await?;

    info!(model, sold = quantity, remaining, "product sold");
    state.events.publish(DomainEvent::ProductSold { model: model.to_string(), sold: quantity, remaining }).await;
    Ok(remaining)
}

/// Lists products; a model filter naming an unknown model is an error rather
/// than an empty list
pub async fn get_products(state: &AppState, filter: &ProductFilter, only_available: bool) -> Result<Vec<Product>, AppError> {
    let mut conn = state.db.acquire().await?;
    if let ProductFilter::Model(model) = filter {
        if !products::exists(&mut conn, model).await? {
            return Err(AppError::ProductNotFound);
        }
    }
    products::list(&mut conn, filter, only_available).await
}

pub async fn delete_product(state: &AppState, model: &str) -> Result<(), AppError> {
    let mut conn = state.db.acquire().await?;
    if !products::delete(&mut conn, model).await? {
        return Err(AppError::ProductNotFound);
    }
    info!(model, "product deleted");
    Ok(())
}

pub async fn delete_all_products(state: &AppState) -> Result<(), AppError> {
    let mut conn = state.db.acquire().await?;
    let removed = products::delete_all(&mut conn).await?;
    info!(removed, "all products deleted");
    Ok(())
}
