use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::error::AppError;

pub async fn insert(conn: &mut SqliteConnection, token: &str, username: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
    sqlx::query("INSERT INTO sessions (token, username, expires_at) VALUES ($1, $2, $3)")
        .bind(token)
        .bind(username)
        .bind(expires_at)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Username owning `token`, with its expiry
pub async fn find(conn: &mut SqliteConnection, token: &str) -> Result<Option<(String, DateTime<Utc>)>, AppError> {
    let row = sqlx::query_as::<_, (String, DateTime<Utc>)>("SELECT username, expires_at FROM sessions WHERE token = $1")
        .bind(token)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn delete(conn: &mut SqliteConnection, token: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM sessions WHERE token = $1").bind(token).execute(&mut *conn).await?;
    Ok(())
}

pub async fn delete_expired(conn: &mut SqliteConnection, now: DateTime<Utc>) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < $1").bind(now).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
