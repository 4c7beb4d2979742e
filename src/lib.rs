//! EZElectronics
//!
//! Backend of a small electronics store.
//!
//! ## Features
//! - Product inventory: arrivals, restocking, sales, filtered listings
//! - Per-customer carts with checkout and purchase history
//! - User accounts with Customer / Manager / Admin roles
//! - Cookie sessions
//! - Product reviews
//!
//! Every request goes route → authentication guard → body validation →
//! controller → JSON response. Errors leave the service as
//! `{"error": <message>, "status": <code>}`.

use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod error;
pub mod publisher;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use state::{connect_database, AppState};

/// The complete application with its middleware stack
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "ezelectronics"})) }))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
