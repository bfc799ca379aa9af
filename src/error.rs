use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes surfaced to callers of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "ERR_NOT_FOUND")]
    NotFound,
    #[serde(rename = "ERR_INVALID_INPUT")]
    InvalidInput,
}

impl ErrorCode {
    pub fn value(self) -> u32 {
        match self {
            ErrorCode::NotFound => 101,
            ErrorCode::InvalidInput => 102,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "ERR_NOT_FOUND",
            ErrorCode::InvalidInput => "ERR_INVALID_INPUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (u{})", self.as_str(), self.value())
    }
}

#[derive(Debug, Error)]
pub enum CircleError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl CircleError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CircleError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn circle_not_found(id: impl fmt::Display) -> Self {
        CircleError::NotFound {
            entity_type: "Circle".into(),
            id: id.to_string(),
        }
    }

    /// The registry error code for this error, if it is a registry-level failure.
    /// Storage and configuration failures have no code.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            CircleError::InvalidInput { .. } => Some(ErrorCode::InvalidInput),
            CircleError::NotFound { .. } => Some(ErrorCode::NotFound),
            _ => None,
        }
    }
}

pub type CircleResult<T> = Result<T, CircleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_code() {
        let err = CircleError::invalid("name", "must not be empty");
        assert_eq!(err.error_code(), Some(ErrorCode::InvalidInput));
        assert_eq!(err.to_string(), "invalid name: must not be empty");
    }

    #[test]
    fn not_found_maps_to_code() {
        let err = CircleError::circle_not_found(7);
        assert_eq!(err.error_code(), Some(ErrorCode::NotFound));
        assert_eq!(err.to_string(), "Circle not found: 7");
    }

    #[test]
    fn storage_errors_have_no_code() {
        let err = CircleError::Config("bad".into());
        assert_eq!(err.error_code(), None);
    }

    #[test]
    fn error_code_values() {
        assert_eq!(ErrorCode::NotFound.value(), 101);
        assert_eq!(ErrorCode::InvalidInput.value(), 102);
        assert_eq!(ErrorCode::InvalidInput.to_string(), "ERR_INVALID_INPUT (u102)");
    }

    #[test]
    fn error_code_serializes_symbolically() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "\"ERR_NOT_FOUND\"");
    }
}
