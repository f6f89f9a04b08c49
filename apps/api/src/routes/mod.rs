pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_form_page))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/analyze-form", post(handlers::handle_analyze_form))
        .route("/api/v1/models", get(handlers::handle_list_models))
        .with_state(state)
}
