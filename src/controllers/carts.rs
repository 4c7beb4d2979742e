use std::collections::HashMap;

use tracing::info;

use crate::domain::aggregates::{Cart, User};
use crate::domain::events::DomainEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{self, carts, products};

/// The customer's open cart, or an empty one that is not stored yet
pub async fn get_cart(state: &AppState, customer: &User) -> Result<Cart, AppError> {
    let mut conn = state.db.acquire().await?;
    let cart = carts::find_unpaid(&mut conn, customer.username()).await?;
    Ok(cart.unwrap_or_else(|| Cart::new(customer.username())))
}

pub async fn add_to_cart(state: &AppState, customer: &User, model: &str) -> Result<(), AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let product = products::find(&mut tx, model).await?.ok_or(AppError::ProductNotFound)?;
    let mut cart = carts::find_unpaid(&mut tx, customer.username())
        .await?
        .unwrap_or_else(|| Cart::new(customer.username()));
    cart.add_unit(&product)?;
    carts::save(&mut tx, &cart).await?;
    tx.commit().await?;

    info!(customer = customer.username(), model, total = cart.total(), "added to cart");
    Ok(())
}

/// Pays the open cart, taking every line out of stock in one transaction
pub async fn checkout_cart(state: &AppState, customer: &User) -> Result<(), AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let mut cart = carts::find_unpaid(&mut tx, customer.username()).await?.ok_or(AppError::CartNotFound)?;

    let mut stock = HashMap::with_capacity(cart.products().len());
    for line in cart.products() {
        if let Some(product) = products::find(&mut tx, &line.model).await? {
            stock.insert(line.model.clone(), product.quantity());
        }
    }
    cart.checkout(|model| stock.get(model).copied(), state.today())?;

    for line in cart.products() {
        let available = stock.get(&line.model).copied().unwrap_or_default();
        products::set_quantity(&mut tx, &line.model, available - line.quantity).await?;
    }
    carts::save(&mut tx, &cart).await?;
    tx.commit().await?;

    info!(customer = customer.username(), total = cart.total(), lines = cart.products().len(), "cart checked out");
    state.events.publish(DomainEvent::CartCheckedOut {
        customer: customer.username().to_string(),
        total: cart.total(),
        lines: cart.products().len(),
    }).await;
    Ok(())
}

pub async fn get_customer_carts(state: &AppState, customer: &User) -> Result<Vec<Cart>, AppError> {
    let mut conn = state.db.acquire().await?;
    carts::list_paid(&mut conn, customer.username()).await
}

pub async fn remove_product_from_cart(state: &AppState, customer: &User, model: &str) -> Result<(), AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    if !products::exists(&mut tx, model).await? {
        return Err(AppError::ProductNotFound);
    }
    let mut cart = carts::find_unpaid(&mut tx, customer.username()).await?.ok_or(AppError::CartNotFound)?;
    cart.remove_unit(model)?;
    carts::save(&mut tx, &cart).await?;
    tx.commit().await?;

    info!(customer = customer.username(), model, total = cart.total(), "removed from cart");
    Ok(())
}

pub async fn clear_cart(state: &AppState, customer: &User) -> Result<(), AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let mut cart = carts::find_unpaid(&mut tx, customer.username()).await?.ok_or(AppError::CartNotFound)?;
    cart.clear();
    carts::save(&mut tx, &cart).await?;
    tx.commit().await?;

    info!(customer = customer.username(), "cart cleared");
    Ok(())
}

pub async fn delete_all_carts(state: &AppState) -> Result<(), AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let removed = carts::delete_all(&mut tx).await?;
    tx.commit().await?;
    info!(removed, "all carts deleted");
    Ok(())
}

pub async fn get_all_carts(state: &AppState) -> Result<Vec<Cart>, AppError> {
    let mut conn = state.db.acquire().await?;
    carts::list_all(&mut conn).await
}
