//! Error types for the course API client

use thiserror::Error;

/// Errors that can occur when talking to the course API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Quiz generation answered without a `mcqs` field
    #[error("No MCQs in response{}", .detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    MissingQuestions {
        /// Server-provided detail, if the body had one
        detail: Option<String>,
    },

    /// Configured base URL cannot be used
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Whether the server answered but left out the question list
    pub fn is_missing_questions(&self) -> bool {
        matches!(self, ApiError::MissingQuestions { .. })
    }

    /// HTTP status of the failure, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ApiError { status, .. } => Some(*status),
            ApiError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
