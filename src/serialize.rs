//! [`Issue`] list ↔ report text.

use crate::error::SerializeError;
use crate::issue::Issue;

/// Serialize issues as a pretty-printed JSON array.
pub fn issues_to_json(issues: &[Issue]) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(issues).map_err(|e| SerializeError {
        message: format!("failed to serialize issues to JSON: {}", e),
    })
}

/// Serialize issues as a YAML sequence.
pub fn issues_to_yaml(issues: &[Issue]) -> Result<String, SerializeError> {
    // Go through serde_json::Value for the same field layout as the JSON form.
    let value = serde_json::to_value(issues).map_err(|e| SerializeError {
        message: format!("failed to convert issues to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize issues to YAML: {}", e),
    })
}

/// Read back a JSON issue report.
pub fn issues_from_json(input: &str) -> Result<Vec<Issue>, SerializeError> {
    serde_json::from_str(input).map_err(|e| SerializeError {
        message: format!("invalid issue report: {}", e),
    })
}
