//! Error types for task intake.
//!
//! Scoring itself never fails; everything here is raised while turning
//! submitted task records into validated [`crate::Task`] values.

use thiserror::Error;

/// A due date string that is not a strict `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{value}': expected YYYY-MM-DD")]
pub struct ParseError {
    pub value: String,
}

impl ParseError {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// First problem found in a submitted batch.
///
/// Messages are user-facing; they are returned verbatim in 400 responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("Expected a list of tasks")]
    NotAList,

    #[error("No tasks provided")]
    EmptyBatch,

    #[error("Task {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },

    #[error(
        "Task {index} missing required field '{field}'. Each task must have title, due_date, estimated_hours, and importance"
    )]
    MissingField { index: usize, field: &'static str },

    #[error("Task {index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("Task \"{title}\" has invalid importance. Must be between 1-10")]
    Importance { title: String },

    #[error("Task \"{title}\" has invalid estimated hours. Must be positive")]
    EstimatedHours { title: String },

    #[error("Task \"{title}\" has invalid due date: {source}")]
    DueDate {
        title: String,
        #[source]
        source: ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_task() {
        let e = ValidationError::Importance { title: "Ship it".to_string() };
        assert_eq!(e.to_string(), "Task \"Ship it\" has invalid importance. Must be between 1-10");

        let e = ValidationError::MissingField { index: 2, field: "importance" };
        assert!(e.to_string().starts_with("Task 2 missing required field 'importance'"));
    }

    #[test]
    fn due_date_error_carries_parse_source() {
        let e = ValidationError::DueDate {
            title: "Report".to_string(),
            source: ParseError::new("2025-13-01"),
        };
        assert!(e.to_string().contains("invalid date '2025-13-01'"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
