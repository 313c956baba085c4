pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::profile::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile pipeline
        .route(
            "/api/v1/profile/parse",
            post(handlers::handle_parse_profile),
        )
        .route("/api/v1/profile", get(handlers::handle_get_profile))
        .with_state(state)
}
