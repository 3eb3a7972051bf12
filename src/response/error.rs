//! Error kinds surfaced to the user for a single analysis cycle.
//!
//! None of these are fatal to the process; the user can always retry. Partial
//! failures of individual sections are not errors at all. They degrade to a
//! placeholder in [`super::SectionOutcome`].

use serde_json::Value;
use thiserror::Error;

/// Error fields a JSON error body may carry, in lookup order.
const ERROR_MESSAGE_KEYS: &[&str] = &["error", "message", "detail"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No code was provided. The request is never sent.
    #[error("Please enter some code to analyze")]
    EmptyCode,

    /// No analysis module was selected. The request is never sent.
    #[error("Please select at least one analysis option")]
    NoOptionsSelected,

    /// The service answered with a non-success HTTP status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body is not JSON or has no `results` object.
    #[error("Invalid response format from server: {0}")]
    MalformedResponse(String),

    /// The service reported `success: false`.
    #[error("{0}")]
    ServerReported(String),
}

impl AnalysisError {
    /// Build an HTTP error from a status code and raw response body.
    ///
    /// Pulls the first of `error`, `message`, `detail` out of a JSON body.
    /// Non-JSON bodies and JSON without a usable message get a generic
    /// status-based message.
    pub fn from_http_failure(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| extract_message(&v))
            .unwrap_or_else(|| format!("Server responded with status {status}"));

        Self::Http { status, message }
    }

    /// Short machine-readable kind, used in the event log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyCode => "empty_code",
            Self::NoOptionsSelected => "no_options",
            Self::Http { .. } => "http",
            Self::MalformedResponse(_) => "malformed_response",
            Self::ServerReported(_) => "server_reported",
        }
    }
}

/// First non-blank string under one of [`ERROR_MESSAGE_KEYS`].
pub(crate) fn extract_message(value: &Value) -> Option<String> {
    ERROR_MESSAGE_KEYS.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
