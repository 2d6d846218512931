//! Error types for the listing assistant.
//!
//! None of these reach the user: [`ListingAssistant`](crate::ListingAssistant)
//! logs them and substitutes fallback text.

use thiserror::Error;

/// Failure talking to the text-generation service.
#[derive(Debug, Error)]
pub enum ExternalServiceError {
    /// No API key configured.
    #[error("No API key configured for the text-generation service")]
    MissingCredentials,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The reply carried no text.
    #[error("Empty response from the text-generation service")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid assistant configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssistConfigError {
    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("timeout_secs must be greater than 0")]
    ZeroTimeout,
}

pub type AssistResult<T> = Result<T, ExternalServiceError>;
