use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/projects", get(handlers::projects))
        .route("/showcase", get(handlers::showcase))
        .route("/badge", get(handlers::badge))
        .route("/download-data.json", get(handlers::raw_document))
        .route("/api/history", get(handlers::get_history))
        .route("/api/projects", get(handlers::get_projects))
        .with_state(state)
}
