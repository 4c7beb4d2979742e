use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use super::{not_blank, ValidatedJson};
use crate::auth::{cleared_cookie, session_cookie, Session};
use crate::controllers::sessions as controller;
use crate::domain::aggregates::User;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(login))
        .route("/current", get(current).delete(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "not_blank")]
    pub username: String,
    #[validate(custom = "not_blank")]
    pub password: String,
}

async fn login(State(s): State<AppState>, ValidatedJson(r): ValidatedJson<LoginRequest>) -> Result<impl IntoResponse, AppError> {
    let (user, token) = controller::login(&s, &r.username, r.password).await?;
    let cookie = session_cookie(&token, s.config.session_ttl);
    Ok(([(SET_COOKIE, cookie)], Json(user)))
}

async fn current(session: Session) -> Json<User> {
    Json(session.user)
}

async fn logout(session: Session, State(s): State<AppState>) -> Result<impl IntoResponse, AppError> {
    controller::logout(&s, &session.user, &session.token).await?;
    Ok((StatusCode::OK, [(SET_COOKIE, cleared_cookie())]))
}
