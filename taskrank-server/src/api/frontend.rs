// Frontend page: the configured index.html, or a notice when it is missing

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::warn;

use super::AppState;
use super::error::{ApiError, ApiResult};

const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Smart Task Analyzer</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
        .container { max-width: 600px; margin: 0 auto; }
        .error { background: #ffeaa7; padding: 20px; border-radius: 8px; margin: 20px 0; }
        .success { background: #55efc4; padding: 15px; border-radius: 8px; margin: 20px 0; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Smart Task Analyzer</h1>
        <div class="error">
            <h3>Frontend Files Not Found</h3>
            <p>The frontend index.html could not be found at the configured path.</p>
        </div>
        <div class="success">
            <h3>Backend API is Working!</h3>
            <p>Test the API: <a href="/api/info/" target="_blank">API Info</a></p>
            <p>Task suggestions: <a href="/api/tasks/suggest/" target="_blank">Task Suggestions</a></p>
        </div>
    </div>
</body>
</html>
"#;

/// GET /
pub async fn serve_frontend(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let path = &state.frontend_index;
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "frontend index missing, serving fallback page");
            Ok((StatusCode::NOT_FOUND, Html(FALLBACK_PAGE)).into_response())
        }
        Err(e) => Err(e)
            .with_context(|| format!("reading {}", path.display()))
            .map_err(ApiError::from),
    }
}

/// Anything unrouted.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
