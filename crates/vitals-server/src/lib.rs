//! vitals-server
//!
//! HTTP API over the patient store: view, sorted listing, create and
//! partial update.

use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/view/{id}", get(routes::patients::view_patient))
        .route("/sort", get(routes::patients::sort_patients))
        .route("/create", post(routes::patients::create_patient))
        .route("/update/{id}", put(routes::patients::update_patient))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
