use chrono::NaiveDate;
use sqlx::{FromRow, SqliteConnection};

use crate::domain::aggregates::Product;
use crate::domain::value_objects::{Category, ProductFilter};
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct ProductRow {
    model: String,
    category: String,
    quantity: u32,
    selling_price: f64,
    details: Option<String>,
    arrival_date: NaiveDate,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;
    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        let category: Category = r.category.parse().map_err(|e| AppError::Internal(format!("corrupt product row: {e}")))?;
        Ok(Product::restore(r.model, category, r.quantity, r.selling_price, r.details, r.arrival_date))
    }
}

const COLUMNS: &str = "model, category, quantity, selling_price, details, arrival_date";

pub async fn insert(conn: &mut SqliteConnection, product: &Product) -> Result<bool, AppError> {
    let result = sqlx::query(
        "INSERT INTO products (model, category, quantity, selling_price, details, arrival_date) VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (model) DO NOTHING",
    )
    .bind(product.model())
    .bind(product.category().as_str())
    .bind(product.quantity())
    .bind(product.selling_price())
    .bind(product.details())
    .bind(product.arrival_date())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn find(conn: &mut SqliteConnection, model: &str) -> Result<Option<Product>, AppError> {
    sqlx::query_as::<_, ProductRow>(&format!("SELECT {COLUMNS} FROM products WHERE model = $1"))
        .bind(model)
        .fetch_optional(&mut *conn)
        .await?
        .map(Product::try_from)
        .transpose()
}

pub async fn exists(conn: &mut SqliteConnection, model: &str) -> Result<bool, AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE model = $1")
        .bind(model)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

pub async fn list(conn: &mut SqliteConnection, filter: &ProductFilter, only_available: bool) -> Result<Vec<Product>, AppError> {
    let stock = if only_available { " AND quantity > 0" } else { "" };
    let rows = match filter {
        ProductFilter::All => {
            let sql = format!("SELECT {COLUMNS} FROM products WHERE 1 = 1{stock} ORDER BY model");
            sqlx::query_as::<_, ProductRow>(&sql).fetch_all(&mut *conn).await?
        }
        ProductFilter::Category(category) => {
            let sql = format!("SELECT {COLUMNS} FROM products WHERE category = $1{stock} ORDER BY model");
            sqlx::query_as::<_, ProductRow>(&sql).bind(category.as_str()).fetch_all(&mut *conn).await?
        }
        ProductFilter::Model(model) => {
            let sql = format!("SELECT {COLUMNS} FROM products WHERE model = $1{stock}");
            sqlx::query_as::<_, ProductRow>(&sql).bind(model.as_str()).fetch_all(&mut *conn).await?
        }
    };
    rows.into_iter().map(Product::try_from).collect()
}

pub async fn set_quantity(conn: &mut SqliteConnection, model: &str, quantity: u32) -> Result<(), AppError> {
    sqlx::query("UPDATE products SET quantity = $2 WHERE model = $1")
        .bind(model)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, model: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE model = $1").bind(model).execute(&mut *conn).await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM products").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
