//! Response event log. Records tolerated warnings and aborted cycles.
//!
//! The analysis log keeps one summary line per response. This log keeps the
//! detail: which optional fields were missing, and the message of every error
//! surfaced to the user. Useful when the service changes its response shape.
//!
//! Log file: `~/.codelens/events.jsonl` (configurable).

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::response::AnalysisError;

use super::logger::append_jsonl;

// ---------------------------------------------------------------------------
// Event entry
// ---------------------------------------------------------------------------

/// One response event. One line per warning or error.
#[derive(Debug, Serialize)]
pub struct ResponseEvent {
    pub timestamp: String,
    /// `"warning"` or `"error"`.
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    /// Error kind for `"error"` events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Best-effort; failures are silently ignored.
pub fn log_event(path: &Path, event: &ResponseEvent) {
    let _ = append_jsonl(path, event);
}

/// Convenience: log every warning of a report.
pub fn log_warnings(path: &Path, analysis_id: Option<&str>, warnings: &[String]) {
    for warning in warnings {
        let event = ResponseEvent {
            timestamp: Utc::now().to_rfc3339(),
            level: "warning".to_string(),
            analysis_id: analysis_id.map(|s| s.to_string()),
            kind: None,
            message: warning.clone(),
        };
        log_event(path, &event);
    }
}

/// Convenience: log an aborted cycle.
pub fn log_error(path: &Path, error: &AnalysisError) {
    let event = ResponseEvent {
        timestamp: Utc::now().to_rfc3339(),
        level: "error".to_string(),
        analysis_id: None,
        kind: Some(error.kind().to_string()),
        message: error.to_string(),
    };
    log_event(path, &event);
}
