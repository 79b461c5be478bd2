//! Task records: the loose wire shape, the validated task, and the scored output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ValidationError;
use crate::time::parse_due_date;

/// Id assumed for tasks submitted without one.
pub const DEFAULT_TASK_ID: &str = "temp_id";

/// An id as it appears on the wire: clients send strings, sometimes numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawId {
    /// Matching key for the id. Floats keep their decimal point, so `7.0`
    /// becomes "7.0" and never collides with the integer id `7`.
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => format!("{f:?}"),
        }
    }
}

/// One submitted task before validation. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskInput {
    pub id: Option<RawId>,
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub importance: Option<f64>,
    pub dependencies: Option<Vec<String>>,
}

impl TaskInput {
    /// Check one record, in the order problems are reported:
    /// required fields, importance range, hours, title, due date.
    pub fn validate(self, index: usize) -> Result<Task, ValidationError> {
        let missing = |field| ValidationError::MissingField { index, field };

        let title = self.title.ok_or_else(|| missing("title"))?;
        let due_date = self.due_date.ok_or_else(|| missing("due_date"))?;
        let estimated_hours = self.estimated_hours.ok_or_else(|| missing("estimated_hours"))?;
        let importance = self.importance.ok_or_else(|| missing("importance"))?;

        if !(1.0..=10.0).contains(&importance) {
            return Err(ValidationError::Importance { title });
        }
        if !(estimated_hours > 0.0) {
            return Err(ValidationError::EstimatedHours { title });
        }
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle { index });
        }

        let due_date = match parse_due_date(&due_date) {
            Ok(d) => d,
            Err(source) => return Err(ValidationError::DueDate { title, source }),
        };

        Ok(Task {
            id: self.id.map(RawId::into_string),
            title,
            due_date,
            estimated_hours,
            importance,
            dependencies: self.dependencies.unwrap_or_default(),
        })
    }
}

/// A validated task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(serialize_with = "serialize_number")]
    pub estimated_hours: f64,
    /// 1-10, higher means more important.
    #[serde(serialize_with = "serialize_number")]
    pub importance: f64,
    /// Ids of tasks this one waits on.
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            due_date,
            estimated_hours: 1.0,
            importance: 5.0,
            dependencies: Vec::new(),
        }
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Id used when matching dependency lists.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(DEFAULT_TASK_ID)
    }
}

/// A task with its computed priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub priority_score: f64,
    pub strategy_used: String,
}

// Whole numbers go out as integers so `"importance": 9` round-trips as sent.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
