use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::{not_blank, ValidatedJson};
use crate::auth::{AdminOnly, Session};
use crate::controllers::users::{self as controller, NewUser, ProfileUpdate};
use crate::domain::aggregates::User;
use crate::domain::value_objects::Role;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(get_users).delete(delete_all))
        .route("/roles/:role", get(get_users_by_role))
        .route("/:username", get(get_user).delete(delete_user).patch(update_user))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom = "not_blank")]
    pub username: String,
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub surname: String,
    #[validate(custom = "not_blank")]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub surname: String,
    #[validate(custom = "not_blank")]
    pub address: String,
    pub birthdate: NaiveDate,
}

async fn create_user(
    State(s): State<AppState>,
    ValidatedJson(r): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = controller::create_user(&s, NewUser {
        username: r.username,
        name: r.name,
        surname: r.surname,
        password: r.password,
        role: r.role,
    })
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_users(AdminOnly(_): AdminOnly, State(s): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(controller::list_users(&s, None).await?))
}

async fn get_users_by_role(
    AdminOnly(_): AdminOnly,
    State(s): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<Vec<User>>, AppError> {
    let role: Role = role.parse()?;
    Ok(Json(controller::list_users(&s, Some(role)).await?))
}

async fn get_user(session: Session, State(s): State<AppState>, Path(username): Path<String>) -> Result<Json<User>, AppError> {
    Ok(Json(controller::get_user(&s, &session.user, &username).await?))
}

async fn delete_user(session: Session, State(s): State<AppState>, Path(username): Path<String>) -> Result<StatusCode, AppError> {
    controller::delete_user(&s, &session.user, &username).await?;
    Ok(StatusCode::OK)
}

async fn delete_all(AdminOnly(admin): AdminOnly, State(s): State<AppState>) -> Result<StatusCode, AppError> {
    controller::delete_all_users(&s, &admin).await?;
    Ok(StatusCode::OK)
}

async fn update_user(
    session: Session,
    State(s): State<AppState>,
    Path(username): Path<String>,
    ValidatedJson(r): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let update = ProfileUpdate { name: r.name, surname: r.surname, address: r.address, birthdate: r.birthdate };
    Ok(Json(controller::update_user(&s, &session.user, &username, update).await?))
}
