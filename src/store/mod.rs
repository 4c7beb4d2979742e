//! SQLite persistence. Every function takes a plain connection so callers can
//! run it on a pooled connection or inside a transaction.
pub mod carts;
pub mod products;
pub mod reviews;
pub mod sessions;
pub mod users;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;

/// Opens a transaction that holds the database write lock from its first
/// statement. Concurrent writers queue on the busy timeout rather than
/// failing to upgrade a read lock with `SQLITE_BUSY`.
pub async fn begin_write(db: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    let mut tx = db.begin().await?;
    sqlx::query("UPDATE write_lock SET epoch = epoch + 1 WHERE id = 1").execute(&mut *tx).await?;
    Ok(tx)
}
