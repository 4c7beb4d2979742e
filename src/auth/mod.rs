//! Session authentication and role guards.
//!
//! Guards are axum extractors. Handlers list them before any body extractor,
//! so an unauthenticated or wrong-role caller is rejected with 401 before the
//! request body is validated.

pub mod password;

use std::time::Duration;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use chrono::Utc;
use tracing::debug;

use crate::domain::aggregates::User;
use crate::domain::value_objects::Role;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{sessions, users};

pub const SESSION_COOKIE: &str = "ezelectronics.sid";

/// Any logged-in user, with the session token they presented
pub struct Session {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            debug!("request without session cookie");
            return Err(AppError::Unauthenticated);
        };
        let mut conn = state.db.acquire().await?;
        let Some((username, expires_at)) = sessions::find(&mut conn, &token).await? else {
            debug!("unknown session token");
            return Err(AppError::Unauthenticated);
        };
        if expires_at <= Utc::now() {
            debug!(%username, "session expired");
            sessions::delete(&mut conn, &token).await?;
            return Err(AppError::Unauthenticated);
        }
        let user = users::find(&mut conn, &username).await?.ok_or(AppError::Unauthenticated)?;
        Ok(Self { user, token })
    }
}

macro_rules! role_guard {
    ($(#[$doc:meta])* $name:ident, $message:literal, $($role:ident)|+) => {
        $(#[$doc])*
        pub struct $name(pub User);

        #[async_trait]
        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
                let Session { user, .. } = Session::from_request_parts(parts, state).await?;
                match user.role() {
                    $(Role::$role)|+ => Ok(Self(user)),
                    other => {
                        debug!(username = user.username(), role = %other, "{}", $message);
                        Err(AppError::Forbidden($message))
                    }
                }
            }
        }
    };
}

role_guard!(
    /// Logged in as a customer
    CustomerOnly, "User is not a customer", Customer
);
role_guard!(
    /// Logged in as an admin
    AdminOnly, "User is not an admin", Admin
);
role_guard!(
    /// Logged in as an admin or a manager
    AdminOrManager, "User is not an admin or manager", Admin | Manager
);

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}", ttl.as_secs())
}

pub fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; ezelectronics.sid=abc123; lang=it"));
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));

        headers.insert(COOKIE, HeaderValue::from_static("ezelectronics.sidx=nope"));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", Duration::from_secs(3600));
        assert!(cookie.starts_with("ezelectronics.sid=tok;"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cleared_cookie().contains("Max-Age=0"));
    }
}
