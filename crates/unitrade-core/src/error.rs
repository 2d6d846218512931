//! # Error Types
//!
//! Domain-specific error types for unitrade-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  unitrade-core errors (this file)                                      │
//! │  ├── CoreError        - Session / catalog errors                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  unitrade-assist errors (separate crate)                               │
//! │  └── ExternalServiceError - Text generation failures (never fatal)     │
//! │                                                                         │
//! │  market-shell errors (in app)                                          │
//! │  └── ApiError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Filtering, listing and log recording are total and never produce one of
/// these. Only session construction, lookups and listing creation can fail.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The active user is not in the user directory.
    ///
    /// ## When This Occurs
    /// - `current_user_id` in the config points at an unknown user
    /// - Seed data was disabled and no directory was supplied
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// Listing cannot be found.
    #[error("Listing not found: {0}")]
    ListingNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state changes, so a rejected draft leaves the catalog
/// and the query log untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::UserNotFound(999).to_string(), "User not found: 999");
        assert_eq!(
            CoreError::ListingNotFound(4).to_string(),
            "Listing not found: 4"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("title");
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::TooLong {
            field: "location".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "location must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("price").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: price is required");
    }
}
