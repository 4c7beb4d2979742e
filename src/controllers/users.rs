use chrono::NaiveDate;
use tracing::info;

use crate::auth::password::hash_password;
use crate::domain::aggregates::User;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::Role;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{self, users};

pub struct NewUser {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub password: String,
    pub role: Role,
}

pub struct ProfileUpdate {
    pub name: String,
    pub surname: String,
    pub address: String,
    pub birthdate: NaiveDate,
}

pub async fn create_user(state: &AppState, new: NewUser) -> Result<User, AppError> {
    let cost = state.config.password_cost;
    let password = new.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing aborted: {e}")))??;

    let user = User::new(new.username, new.name, new.surname, new.role);
    let mut conn = state.db.acquire().await?;
    if !users::insert(&mut conn, &user, &hash).await? {
        return Err(AppError::UserAlreadyExists);
    }

    info!(username = user.username(), role = %user.role(), "user created");
    state.events.publish(DomainEvent::UserCreated { username: user.username().to_string(), role: user.role() }).await;
    Ok(user)
}

pub async fn list_users(state: &AppState, role: Option<Role>) -> Result<Vec<User>, AppError> {
    let mut conn = state.db.acquire().await?;
    users::list(&mut conn, role).await
}

pub async fn get_user(state: &AppState, actor: &User, username: &str) -> Result<User, AppError> {
    actor.ensure_can_access(username)?;
    let mut conn = state.db.acquire().await?;
    users::find(&mut conn, username).await?.ok_or(AppError::UserNotFound)
}

pub async fn delete_user(state: &AppState, actor: &User, username: &str) -> Result<(), AppError> {
    actor.ensure_can_access(username)?;
    let mut tx = store::begin_write(&state.db).await?;
    let target = users::find(&mut tx, username).await?.ok_or(AppError::UserNotFound)?;
    actor.ensure_can_manage(&target)?;
    users::delete(&mut tx, username).await?;
    tx.commit().await?;

    info!(actor = actor.username(), username, "user deleted");
    Ok(())
}

/// Removes every customer and manager; admins are kept
pub async fn delete_all_users(state: &AppState, actor: &User) -> Result<(), AppError> {
    let mut tx = store::begin_write(&state.db).await?;
    let removed = users::delete_all_non_admins(&mut tx).await?;
    tx.commit().await?;

    info!(actor = actor.username(), removed, "non-admin users deleted");
    Ok(())
}

pub async fn update_user(state: &AppState, actor: &User, username: &str, update: ProfileUpdate) -> Result<User, AppError> {
    actor.ensure_can_access(username)?;
    let mut tx = store::begin_write(&state.db).await?;
    let mut target = users::find(&mut tx, username).await?.ok_or(AppError::UserNotFound)?;
    actor.ensure_can_manage(&target)?;
    target.update_profile(update.name, update.surname, update.address, update.birthdate, state.today())?;
    users::update_profile(&mut tx, &target).await?;
    tx.commit().await?;

    info!(actor = actor.username(), username, "user profile updated");
    Ok(target)
}
