use sqlx::SqliteConnection;
use tracing::info;

use crate::domain::aggregates::{Review, User};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{products, reviews};

async fn ensure_product(conn: &mut SqliteConnection, model: &str) -> Result<(), AppError> {
    if products::exists(conn, model).await? { Ok(()) } else { Err(AppError::ProductNotFound) }
}

pub async fn add_review(state: &AppState, customer: &User, model: &str, score: u8, comment: String) -> Result<Review, AppError> {
    let mut conn = state.db.acquire().await?;
    ensure_product(&mut conn, model).await?;
    let review = Review::write(model, customer.username(), score, comment, state.today())?;
    if !reviews::insert(&mut conn, &review).await? {
        return Err(AppError::ExistingReview);
    }
    info!(customer = customer.username(), model, score, "review added");
    Ok(review)
}

pub async fn get_product_reviews(state: &AppState, model: &str) -> Result<Vec<Review>, AppError> {
    let mut conn = state.db.acquire().await?;
    ensure_product(&mut conn, model).await?;
    reviews::list_for_product(&mut conn, model).await
}

pub async fn delete_review(state: &AppState, customer: &User, model: &str) -> Result<(), AppError> {
    let mut conn = state.db.acquire().await?;
    ensure_product(&mut conn, model).await?;
    if !reviews::delete(&mut conn, model, customer.username()).await? {
        return Err(AppError::NoReviewProduct);
    }
    info!(customer = customer.username(), model, "review deleted");
    Ok(())
}

pub async fn delete_reviews_of_product(state: &AppState, model: &str) -> Result<(), AppError> {
    let mut conn = state.db.acquire().await?;
    ensure_product(&mut conn, model).await?;
    let removed = reviews::delete_for_product(&mut conn, model).await?;
    info!(model, removed, "product reviews deleted");
    Ok(())
}

pub async fn delete_all_reviews(state: &AppState) -> Result<(), AppError> {
    let mut conn = state.db.acquire().await?;
    let removed = reviews::delete_all(&mut conn).await?;
    info!(removed, "all reviews deleted");
    Ok(())
}
