use chrono::NaiveDate;
use sqlx::{FromRow, SqliteConnection};

use crate::domain::aggregates::User;
use crate::domain::value_objects::Role;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    name: String,
    surname: String,
    role: String,
    address: Option<String>,
    birthdate: Option<NaiveDate>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;
    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role: Role = r.role.parse().map_err(|e| AppError::Internal(format!("corrupt user row: {e}")))?;
        Ok(User::restore(r.username, r.name, r.surname, role, r.address, r.birthdate))
    }
}

const COLUMNS: &str = "username, name, surname, role, address, birthdate";

pub async fn insert(conn: &mut SqliteConnection, user: &User, password_hash: &str) -> Result<bool, AppError> {
    let result = sqlx::query(
        "INSERT INTO users (username, name, surname, role, password_hash) VALUES ($1, $2, $3, $4, $5) ON CONFLICT (username) DO NOTHING",
    )
    .bind(user.username())
    .bind(user.name())
    .bind(user.surname())
    .bind(user.role().as_str())
    .bind(password_hash)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn find(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?
        .map(User::try_from)
        .transpose()
}

/// The user together with the stored password hash, for login
pub async fn find_with_hash(conn: &mut SqliteConnection, username: &str) -> Result<Option<(User, String)>, AppError> {
    #[derive(FromRow)]
    struct Credentials {
        #[sqlx(flatten)]
        user: UserRow,
        password_hash: String,
    }

    let row = sqlx::query_as::<_, Credentials>(&format!("SELECT {COLUMNS}, password_hash FROM users WHERE username = $1"))
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|c| Ok((User::try_from(c.user)?, c.password_hash))).transpose()
}

pub async fn list(conn: &mut SqliteConnection, role: Option<Role>) -> Result<Vec<User>, AppError> {
    let rows = match role {
        Some(role) => {
            sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY username"))
                .bind(role.as_str())
                .fetch_all(&mut *conn)
                .await?
        }
        None => {
            sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users ORDER BY username"))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    rows.into_iter().map(User::try_from).collect()
}

pub async fn update_profile(conn: &mut SqliteConnection, user: &User) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET name = $2, surname = $3, address = $4, birthdate = $5 WHERE username = $1")
        .bind(user.username())
        .bind(user.name())
        .bind(user.surname())
        .bind(user.address())
        .bind(user.birthdate())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Removes the user; sessions, carts and reviews go with it by cascade
pub async fn delete(conn: &mut SqliteConnection, username: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE username = $1").bind(username).execute(&mut *conn).await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete_all_non_admins(conn: &mut SqliteConnection) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE role <> 'Admin'").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
