//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the server-rendered page at `/`, its form
//! endpoints, and the JSON API under `/api`. All handlers share `AppState`.

pub mod pages;
pub mod tutorials;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/tutorials", get(tutorials::list_tutorials).post(tutorials::create_tutorial))
        .route("/api/tutorials/{id}", get(tutorials::get_tutorial))
        .route("/api/tutorials/{id}/select", post(tutorials::select_tutorial))
        .layer(cors)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/tutorials", post(pages::submit_topic))
        .route("/tutorials/{id}/select", post(pages::select_tutorial))
        .route("/healthz", get(healthz))
        .merge(api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
