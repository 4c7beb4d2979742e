#![allow(dead_code)]

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use chrono::{Local, NaiveDate};
use ezelectronics::{build_app, connect_database, publisher::EventPublisher, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// In-memory defaults with a cheap password hash
pub fn test_config() -> Config {
    Config { password_cost: 4, ..Config::default() }
}

/// Full application over a fresh in-memory database
pub async fn app() -> Router {
    app_with(test_config()).await
}

pub async fn app_with(config: Config) -> Router {
    let db = connect_database(&config).await.expect("database");
    build_app(AppState::new(db, EventPublisher::default(), config))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn tomorrow() -> NaiveDate {
    today().succ_opt().expect("tomorrow")
}

pub async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).expect("request")).await.expect("infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
    Response { status, headers, body }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, cookie, None).await
}

pub async fn post(app: &Router, uri: &str, cookie: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, cookie, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Response {
    send(app, Method::PATCH, uri, cookie, body).await
}

pub async fn delete(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, cookie, None).await
}

pub async fn create_user(app: &Router, username: &str, role: &str) {
    let body = json!({
        "username": username,
        "name": "Test",
        "surname": "User",
        "password": "password",
        "role": role,
    });
    let res = post(app, "/ezelectronics/users", None, body).await;
    assert_eq!(res.status, StatusCode::CREATED, "creating {username}: {}", res.body);
}

pub async fn login(app: &Router, username: &str, password: &str) -> Response {
    post(app, "/ezelectronics/sessions", None, json!({ "username": username, "password": password })).await
}

/// The `name=value` pair to send back as a cookie
pub fn session_cookie(res: &Response) -> String {
    let header = res.headers.get(SET_COOKIE).expect("set-cookie").to_str().expect("ascii cookie");
    header.split(';').next().expect("cookie pair").to_string()
}

/// Creates a user with `role` and returns a logged-in session cookie
pub async fn logged_in(app: &Router, username: &str, role: &str) -> String {
    create_user(app, username, role).await;
    let res = login(app, username, "password").await;
    assert_eq!(res.status, StatusCode::OK);
    session_cookie(&res)
}

pub async fn register_product(app: &Router, cookie: &str, model: &str, category: &str, quantity: u32, price: f64) {
    let body = json!({
        "model": model,
        "category": category,
        "quantity": quantity,
        "sellingPrice": price,
        "details": "",
        "arrivalDate": "2024-01-01",
    });
    let res = post(app, "/ezelectronics/products", Some(cookie), body).await;
    assert_eq!(res.status, StatusCode::CREATED, "registering {model}: {}", res.body);
}
