//! Request body intake: raw JSON bytes to loose task records.
//!
//! Shared by the HTTP handler and the `analyze` command so both report the
//! same errors for the same input.

use serde_json::Value;
use taskrank_core::{TaskInput, ValidationError};

pub fn parse_batch(body: &[u8]) -> Result<Vec<TaskInput>, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::InvalidBody(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(ValidationError::NotAList);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ValidationError::Malformed {
                    index,
                    reason: "expected a JSON object".to_string(),
                });
            }
            serde_json::from_value(item).map_err(|e| ValidationError::Malformed {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
