// Static capability descriptor

use axum::Json;
use serde_json::{Value, json};
use taskrank_core::strategy_names;

pub const API_NAME: &str = "Smart Task Analyzer API";
pub const BUILD_SHA: &str = env!("TASKRANK_BUILD_SHA");

/// GET /api/info/
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": API_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "build": BUILD_SHA,
        "endpoints": {
            "POST /api/tasks/analyze/": "Analyze and prioritize tasks",
            "GET /api/tasks/suggest/": "Get task suggestions for today",
            "GET /api/info/": "API information"
        },
        "strategies": strategy_names().collect::<Vec<_>>()
    }))
}
