//! taskrank-core: priority scoring and ranking for submitted task batches

pub mod error;
pub mod ranking;
pub mod scoring;
pub mod strategy;
pub mod task;
pub mod time;

pub use error::{ParseError, ValidationError};
pub use ranking::{Ranking, rank, rank_tasks, score_batch, validate_batch};
pub use scoring::{
    BlockingIndex, ScoreBreakdown, Scorer, dependency_score, effort_score, total_score,
    urgency_for_days, urgency_score,
};
pub use strategy::{DEFAULT_STRATEGY_NAME, STRATEGIES, Weights, resolve_weights, strategy_names};
pub use task::{DEFAULT_TASK_ID, RawId, ScoredTask, Task, TaskInput};
pub use time::{Clock, DueDate, FixedClock, ZonedClock, parse_due_date};
