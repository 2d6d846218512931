//! # Shell Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  Prompt line ──► Command handler ──► Result<String, ApiError>           │
//! │                        │                                                │
//! │                        ├── ValidationError ──► VALIDATION_ERROR         │
//! │                        ├── CoreError::*NotFound ──► NOT_FOUND           │
//! │                        └── I/O, JSON ──► INTERNAL                       │
//! │                                                                         │
//! │  The prompt prints the ApiError and keeps going.                        │
//! │                                                                         │
//! │  Start-up ──► ShellError (config, readline, session) ──► exit code 1    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rustyline::error::ReadlineError;
use serde::Serialize;
use thiserror::Error;
use unitrade_core::{CoreError, ValidationError};

/// Error returned from a command handler.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "price is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown user, listing, or command
    NotFound,

    /// Input validation failed
    ValidationError,

    /// File or serialization failure
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UserNotFound(id) => ApiError::not_found("User", id),
            CoreError::ListingNotFound(id) => ApiError::not_found("Listing", id),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O failure: {}", err);
        ApiError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization failed: {}", err);
        ApiError::internal("Failed to serialize output")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Start-up and prompt-loop failures. These end the program.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Session error: {0}")]
    Session(#[from] CoreError),

    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
}

pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ApiError::from(CoreError::ListingNotFound(9));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Listing not found: 9");

        let err = ApiError::from(CoreError::Validation(ValidationError::required("price")));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("price"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("User", 7)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "User not found: 7");
    }

    #[test]
    fn test_display() {
        let err = ApiError::validation("bad price");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] bad price");
    }
}
