use chrono::NaiveDate;
use sqlx::{FromRow, SqliteConnection};

use crate::domain::aggregates::Review;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct ReviewRow {
    model: String,
    user: String,
    score: u8,
    date: NaiveDate,
    comment: String,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self { Review::restore(r.model, r.user, r.score, r.date, r.comment) }
}

pub async fn insert(conn: &mut SqliteConnection, review: &Review) -> Result<bool, AppError> {
    let result = sqlx::query(
        "INSERT INTO reviews (model, user, score, date, comment) VALUES ($1, $2, $3, $4, $5) ON CONFLICT (model, user) DO NOTHING",
    )
    .bind(review.model())
    .bind(review.user())
    .bind(review.score())
    .bind(review.date())
    .bind(review.comment())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn list_for_product(conn: &mut SqliteConnection, model: &str) -> Result<Vec<Review>, AppError> {
    let rows = sqlx::query_as::<_, ReviewRow>("SELECT model, user, score, date, comment FROM reviews WHERE model = $1 ORDER BY date, user")
        .bind(model)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(Review::from).collect())
}

pub async fn delete(conn: &mut SqliteConnection, model: &str, user: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE model = $1 AND user = $2")
        .bind(model)
        .bind(user)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete_for_product(conn: &mut SqliteConnection, model: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE model = $1").bind(model).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM reviews").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
