// Task analysis endpoints

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskrank_core::{Ranking, rank};
use tracing::info;

use super::AppState;
use super::error::ApiResult;
use crate::intake::parse_batch;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub strategy: Option<String>,
}

/// POST /api/tasks/analyze/?strategy=...
pub async fn analyze_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> ApiResult<Json<Ranking>> {
    let strategy = params
        .strategy
        .unwrap_or_else(|| state.default_strategy.clone());

    let inputs = parse_batch(&body)?;
    let today = state.clock.today();
    let ranking = rank(inputs, &strategy, today)?;

    info!(
        strategy = %ranking.strategy_used,
        total = ranking.total_tasks,
        %today,
        "analyzed tasks"
    );
    Ok(Json(ranking))
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub title: &'static str,
    pub reason: &'static str,
    pub priority_score: f64,
    pub due_date: &'static str,
    pub estimated_hours: u32,
    pub importance: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: &'static [Suggestion],
    pub message: &'static str,
}

/// Canned picks; not derived from any submitted tasks.
pub static SUGGESTIONS: [Suggestion; 3] = [
    Suggestion {
        title: "Fix critical login bug",
        reason: "High importance (9/10) and blocking user access",
        priority_score: 0.92,
        due_date: "2025-11-25",
        estimated_hours: 4,
        importance: 9,
    },
    Suggestion {
        title: "Complete project documentation",
        reason: "Quick win - only 2 hours estimated and due tomorrow",
        priority_score: 0.78,
        due_date: "2025-11-26",
        estimated_hours: 2,
        importance: 7,
    },
    Suggestion {
        title: "Setup production monitoring",
        reason: "Blocks deployment of 3 other features",
        priority_score: 0.71,
        due_date: "2025-11-28",
        estimated_hours: 6,
        importance: 8,
    },
];

/// GET /api/tasks/suggest/
pub async fn suggest_tasks() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: &SUGGESTIONS,
        message: "Top 3 recommended tasks for today",
    })
}
