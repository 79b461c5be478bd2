// HTTP router for the task analyzer API

pub mod error;
pub mod frontend;
pub mod info;
pub mod tasks;

use axum::{
    Router,
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use taskrank_core::Clock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Shared, read-only request context.
pub struct AppState {
    /// Decides what "today" is for urgency.
    pub clock: Arc<dyn Clock>,
    pub default_strategy: String,
    pub frontend_index: PathBuf,
}

impl AppState {
    pub fn new(
        clock: Arc<dyn Clock>,
        default_strategy: impl Into<String>,
        frontend_index: impl Into<PathBuf>,
    ) -> Self {
        Self {
            clock,
            default_strategy: default_strategy.into(),
            frontend_index: frontend_index.into(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Both spellings answer; clients disagree on trailing slashes.
    let api = Router::new()
        .route("/tasks/analyze/", post(tasks::analyze_tasks))
        .route("/tasks/analyze", post(tasks::analyze_tasks))
        .route("/tasks/suggest/", get(tasks::suggest_tasks))
        .route("/tasks/suggest", get(tasks::suggest_tasks))
        .route("/info/", get(info::api_info))
        .route("/info", get(info::api_info));

    Router::new()
        .route("/", get(frontend::serve_frontend))
        .nest("/api", api)
        .fallback(frontend::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
