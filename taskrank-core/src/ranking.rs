//! Batch ranking: validate a submitted list, score it, sort it.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;
use crate::scoring::{BlockingIndex, ScoreBreakdown, Scorer};
use crate::strategy::resolve_weights;
use crate::task::{ScoredTask, Task, TaskInput};

/// Ranked batch, in the shape returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub tasks: Vec<ScoredTask>,
    pub strategy_used: String,
    pub total_tasks: usize,
}

/// Validate every record, stopping at the first problem.
pub fn validate_batch(inputs: Vec<TaskInput>) -> Result<Vec<Task>, ValidationError> {
    if inputs.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| input.validate(i))
        .collect()
}

/// Validate, then score and sort. Nothing is scored unless the whole batch is valid.
pub fn rank(
    inputs: Vec<TaskInput>,
    strategy: &str,
    today: NaiveDate,
) -> Result<Ranking, ValidationError> {
    let tasks = validate_batch(inputs)?;
    Ok(rank_tasks(tasks, strategy, today))
}

/// Score already-validated tasks and sort them by priority, highest first.
///
/// `strategy` is echoed as given, even when it fell back to the default weights.
/// Equal scores keep their input order.
pub fn rank_tasks(tasks: Vec<Task>, strategy: &str, today: NaiveDate) -> Ranking {
    let scored = score_batch(&tasks, strategy, today);

    let mut ranked: Vec<ScoredTask> = tasks
        .into_iter()
        .zip(scored)
        .map(|(task, breakdown)| ScoredTask {
            task,
            priority_score: breakdown.total,
            strategy_used: strategy.to_string(),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

    tracing::debug!(
        strategy,
        total = ranked.len(),
        top = ranked.first().map(|t| t.priority_score),
        "ranked batch"
    );

    Ranking {
        total_tasks: ranked.len(),
        strategy_used: strategy.to_string(),
        tasks: ranked,
    }
}

/// Per-factor breakdown for each task, in input order.
pub fn score_batch(tasks: &[Task], strategy: &str, today: NaiveDate) -> Vec<ScoreBreakdown> {
    let scorer = Scorer::new(resolve_weights(strategy), today);
    let index = BlockingIndex::build(tasks);
    tasks.iter().map(|t| scorer.breakdown(t, &index)).collect()
}
