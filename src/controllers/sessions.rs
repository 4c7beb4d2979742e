use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password::verify_password;
use crate::domain::aggregates::User;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{sessions, users};

/// Checks the credentials and opens a session; returns the user and the new token
pub async fn login(state: &AppState, username: &str, password: String) -> Result<(User, String), AppError> {
    let mut conn = state.db.acquire().await?;
    let Some((user, hash)) = users::find_with_hash(&mut conn, username).await? else {
        debug!(%username, "login for unknown user");
        return Err(AppError::InvalidCredentials);
    };

    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("password check aborted: {e}")))?;
    if !verified {
        debug!(%username, "wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let now = Utc::now();
    let expires_at = chrono::Duration::from_std(state.config.session_ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal("session ttl out of range".to_string()))?;
    let token = Uuid::new_v4().simple().to_string();
    sessions::delete_expired(&mut conn, now).await?;
    sessions::insert(&mut conn, &token, user.username(), expires_at).await?;

    info!(username = user.username(), role = %user.role(), "logged in");
    Ok((user, token))
}

pub async fn logout(state: &AppState, user: &User, token: &str) -> Result<(), AppError> {
    let mut conn = state.db.acquire().await?;
    sessions::delete(&mut conn, token).await?;
    info!(username = user.username(), "logged out");
    Ok(())
}
