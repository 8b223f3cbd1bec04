pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::skills::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/compare", post(handlers::handle_compare))
        .route("/skills", post(handlers::handle_extract_skills))
        .route("/roles", get(handlers::handle_roles))
        .route("/roadmap/:role", get(handlers::handle_roadmap))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
