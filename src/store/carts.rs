use chrono::NaiveDate;
use sqlx::{FromRow, SqliteConnection};

use crate::domain::aggregates::{Cart, CartLine};
use crate::domain::value_objects::Category;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct CartRow {
    id: i64,
    customer: String,
    paid: bool,
    payment_date: Option<NaiveDate>,
}

#[derive(Debug, FromRow)]
struct LineRow {
    model: String,
    quantity: u32,
    category: String,
    price: f64,
}

impl TryFrom<LineRow> for CartLine {
    type Error = AppError;
    fn try_from(r: LineRow) -> Result<Self, Self::Error> {
        let category: Category = r.category.parse().map_err(|e| AppError::Internal(format!("corrupt cart line: {e}")))?;
        Ok(CartLine { model: r.model, quantity: r.quantity, category, price: r.price })
    }
}

async fn hydrate(conn: &mut SqliteConnection, row: CartRow) -> Result<Cart, AppError> {
    let lines = sqlx::query_as::<_, LineRow>(
        "SELECT model, quantity, category, price FROM cart_products WHERE cart_id = $1 ORDER BY position",
    )
    .bind(row.id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(CartLine::try_from)
    .collect::<Result<Vec<_>, _>>()?;
    Ok(Cart::restore(row.id, row.customer, row.paid, row.payment_date, lines))
}

async fn hydrate_all(conn: &mut SqliteConnection, rows: Vec<CartRow>) -> Result<Vec<Cart>, AppError> {
    let mut carts = Vec::with_capacity(rows.len());
    for row in rows {
        carts.push(hydrate(&mut *conn, row).await?);
    }
    Ok(carts)
}

pub async fn find_unpaid(conn: &mut SqliteConnection, customer: &str) -> Result<Option<Cart>, AppError> {
    let row = sqlx::query_as::<_, CartRow>("SELECT id, customer, paid, payment_date FROM carts WHERE customer = $1 AND paid = 0")
        .bind(customer)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some(row) => Ok(Some(hydrate(conn, row).await?)),
        None => Ok(None),
    }
}

pub async fn list_paid(conn: &mut SqliteConnection, customer: &str) -> Result<Vec<Cart>, AppError> {
    let rows = sqlx::query_as::<_, CartRow>(
        "SELECT id, customer, paid, payment_date FROM carts WHERE customer = $1 AND paid = 1 ORDER BY id",
    )
    .bind(customer)
    .fetch_all(&mut *conn)
    .await?;
    hydrate_all(conn, rows).await
}

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Cart>, AppError> {
    let rows = sqlx::query_as::<_, CartRow>("SELECT id, customer, paid, payment_date FROM carts ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    hydrate_all(conn, rows).await
}

/// Writes the cart header and replaces its lines. Returns the cart id.
pub async fn save(conn: &mut SqliteConnection, cart: &Cart) -> Result<i64, AppError> {
    let id = match cart.id() {
        Some(id) => {
            sqlx::query("UPDATE carts SET paid = $2, payment_date = $3 WHERE id = $1")
                .bind(id)
                .bind(cart.is_paid())
                .bind(cart.payment_date())
                .execute(&mut *conn)
                .await?;
            id
        }
        None => {
            sqlx::query_scalar::<_, i64>("INSERT INTO carts (customer, paid, payment_date) VALUES ($1, $2, $3) RETURNING id")
                .bind(cart.customer())
                .bind(cart.is_paid())
                .bind(cart.payment_date())
                .fetch_one(&mut *conn)
                .await?
        }
    };

    sqlx::query("DELETE FROM cart_products WHERE cart_id = $1").bind(id).execute(&mut *conn).await?;
    for (position, line) in cart.products().iter().enumerate() {
        sqlx::query("INSERT INTO cart_products (cart_id, model, quantity, category, price, position) VALUES ($1, $2, $3, $4, $5, $6)")
            .bind(id)
            .bind(&line.model)
            .bind(line.quantity)
            .bind(line.category.as_str())
            .bind(line.price)
            .bind(position as i64)
            .execute(&mut *conn)
            .await?;
    }
    Ok(id)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    sqlx::query("DELETE FROM cart_products").execute(&mut *conn).await?;
    let result = sqlx::query("DELETE FROM carts").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
