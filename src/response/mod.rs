//! Analysis response handling.
//!
//! Validates the JSON envelope returned by the analysis service and turns it
//! into a [`DashboardReport`] that a view adapter can render. Envelope-level
//! problems (malformed body, `success: false`) abort the cycle with an
//! [`AnalysisError`]. Section-level problems never do: each of the five
//! sections degrades independently to a placeholder.
//!
//! Expected response shape:
//!
//! ```json
//! {
//!   "success": true,
//!   "results": {
//!     "analysis_id": "a1b2",
//!     "complexity_analysis": "Time Complexity: O(n) ...",
//!     "documentation": "...",
//!     "refactoring_suggestions": "1. ...\n2. ...",
//!     "improvement_suggestions": "...",
//!     "structure_img": "data:image/png;base64,..."
//!   }
//! }
//! ```

pub mod error;
pub mod request;
pub mod scores;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::interpret::{
    ComplexityAssessment, RefactoringSuggestion, count_function_declarations,
    extract_complexity, extract_suggestions,
};

pub use error::AnalysisError;
pub use request::{ANALYZE_ENDPOINT, AnalysisOption, AnalysisRequest, parse_options};
pub use scores::DisplayScores;

// ---------------------------------------------------------------------------
// Field names and placeholders
// ---------------------------------------------------------------------------

const FIELD_COMPLEXITY: &str = "complexity_analysis";
const FIELD_DOCUMENTATION: &str = "documentation";
const FIELD_REFACTORING: &str = "refactoring_suggestions";
const FIELD_IMPROVEMENTS: &str = "improvement_suggestions";
const FIELD_STRUCTURE: &str = "structure_img";
const FIELD_ANALYSIS_ID: &str = "analysis_id";

/// Message shown in place of a section that could not be read.
pub fn placeholder(section: AnalysisOption) -> &'static str {
    match section {
        AnalysisOption::Complexity => "Complexity analysis not available",
        AnalysisOption::Documentation => "Documentation not available",
        AnalysisOption::Refactoring => "Refactoring suggestions not available",
        AnalysisOption::Structure => "Structure diagram not available",
        AnalysisOption::Improvements => "Improvement suggestions not available",
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Result of reading one dashboard section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    Ready(T),
    /// The field was missing or unreadable; carries the placeholder text.
    Unavailable(String),
    /// The section's analysis option was not requested.
    Skipped,
}

impl<T> SectionOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Map the ready value, passing placeholders through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SectionOutcome<U> {
        match self {
            Self::Ready(v) => SectionOutcome::Ready(f(v)),
            Self::Unavailable(msg) => SectionOutcome::Unavailable(msg),
            Self::Skipped => SectionOutcome::Skipped,
        }
    }

    /// Chain a step that may itself degrade the section.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> SectionOutcome<U>) -> SectionOutcome<U> {
        match self {
            Self::Ready(v) => f(v),
            Self::Unavailable(msg) => SectionOutcome::Unavailable(msg),
            Self::Skipped => SectionOutcome::Skipped,
        }
    }
}

/// Everything the view layer needs for one analysis, already interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub analysis_id: Option<String>,
    pub complexity: SectionOutcome<ComplexityAssessment>,
    pub documentation: SectionOutcome<String>,
    pub refactoring: SectionOutcome<Vec<RefactoringSuggestion>>,
    pub improvements: SectionOutcome<String>,
    /// Structure diagram as delivered by the service (usually a data URI).
    pub structure: SectionOutcome<String>,
    pub scores: DisplayScores,
    /// Heuristic function count of the submitted code, when known.
    pub function_count: Option<usize>,
    /// Tolerated problems, e.g. a missing optional field.
    pub warnings: Vec<String>,
}

impl DashboardReport {
    /// Sections that produced content.
    pub fn ready_sections(&self) -> Vec<AnalysisOption> {
        let mut ready = Vec::new();
        if self.complexity.is_ready() {
            ready.push(AnalysisOption::Complexity);
        }
        if self.documentation.is_ready() {
            ready.push(AnalysisOption::Documentation);
        }
        if self.refactoring.is_ready() {
            ready.push(AnalysisOption::Refactoring);
        }
        if self.structure.is_ready() {
            ready.push(AnalysisOption::Structure);
        }
        if self.improvements.is_ready() {
            ready.push(AnalysisOption::Improvements);
        }
        ready
    }
}

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// Interpret a raw response body.
///
/// `request`, when given, limits the report to the selected sections and
/// supplies the code for the function-count heuristic. Without it every
/// section is considered requested.
pub fn interpret_response(
    body: &str,
    request: Option<&AnalysisRequest>,
) -> Result<DashboardReport, AnalysisError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("body is not JSON ({e})")))?;
    interpret_value(&value, request)
}

/// Interpret a body together with the HTTP status it arrived with.
///
/// A non-2xx status aborts with [`AnalysisError::Http`] before the envelope
/// is read, using whatever message the body carries.
pub fn interpret_http_response(
    status: u16,
    body: &str,
    request: Option<&AnalysisRequest>,
) -> Result<DashboardReport, AnalysisError> {
    if !(200..300).contains(&status) {
        return Err(AnalysisError::from_http_failure(status, body));
    }
    interpret_response(body, request)
}

/// Interpret an already-parsed response value.
pub fn interpret_value(
    value: &Value,
    request: Option<&AnalysisRequest>,
) -> Result<DashboardReport, AnalysisError> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message =
            error::extract_message(value).unwrap_or_else(|| "Analysis failed".to_string());
        return Err(AnalysisError::ServerReported(message));
    }

    let results = value
        .get("results")
        .and_then(Value::as_object)
        .ok_or_else(|| AnalysisError::MalformedResponse("missing `results` object".to_string()))?;

    let selected = |option: AnalysisOption| request.is_none_or(|r| r.is_selected(option));
    let mut reader = SectionReader {
        results,
        warnings: Vec::new(),
    };

    let complexity = if selected(AnalysisOption::Complexity) {
        reader
            .text(FIELD_COMPLEXITY, AnalysisOption::Complexity, true)
            .map(|text| extract_complexity(Some(text)))
            .and_then(|a| a.map_or(missing(AnalysisOption::Complexity), SectionOutcome::Ready))
    } else {
        SectionOutcome::Skipped
    };

    let documentation = if selected(AnalysisOption::Documentation) {
        reader
            .text(FIELD_DOCUMENTATION, AnalysisOption::Documentation, true)
            .map(str::to_string)
    } else {
        SectionOutcome::Skipped
    };

    let refactoring = if selected(AnalysisOption::Refactoring) {
        reader
            .text(FIELD_REFACTORING, AnalysisOption::Refactoring, false)
            .map(|text| extract_suggestions(Some(text)))
    } else {
        SectionOutcome::Skipped
    };

    let improvements = if selected(AnalysisOption::Improvements) {
        reader
            .text(FIELD_IMPROVEMENTS, AnalysisOption::Improvements, true)
            .map(str::to_string)
    } else {
        SectionOutcome::Skipped
    };

    // structure_img is optional even when requested: no warning when absent
    let structure = if selected(AnalysisOption::Structure) {
        match results.get(FIELD_STRUCTURE).and_then(Value::as_str) {
            Some(img) if !img.trim().is_empty() => SectionOutcome::Ready(img.to_string()),
            _ => missing(AnalysisOption::Structure),
        }
    } else {
        SectionOutcome::Skipped
    };

    let analysis_id = match results.get(FIELD_ANALYSIS_ID) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let scores = DisplayScores::derive(&complexity, &documentation, &refactoring);

    Ok(DashboardReport {
        analysis_id,
        complexity,
        documentation,
        refactoring,
        improvements,
        structure,
        scores,
        function_count: request.map(|r| count_function_declarations(&r.code)),
        warnings: reader.warnings,
    })
}

fn missing<T>(section: AnalysisOption) -> SectionOutcome<T> {
    SectionOutcome::Unavailable(placeholder(section).to_string())
}

/// Reads string fields out of `results`, collecting warnings as it goes.
struct SectionReader<'a> {
    results: &'a Map<String, Value>,
    warnings: Vec<String>,
}

impl<'a> SectionReader<'a> {
    /// Fetch a string field. Missing and non-string values become
    /// `Unavailable` with a warning. With `reject_blank`, whitespace-only
    /// text is unavailable too.
    fn text(
        &mut self,
        field: &str,
        section: AnalysisOption,
        reject_blank: bool,
    ) -> SectionOutcome<&'a str> {
        let results = self.results;
        match results.get(field) {
            None | Some(Value::Null) => {
                self.warnings.push(format!("missing field `{field}`"));
                missing(section)
            }
            Some(Value::String(s)) if reject_blank && s.trim().is_empty() => {
                self.warnings.push(format!("field `{field}` is empty"));
                missing(section)
            }
            Some(Value::String(s)) => SectionOutcome::Ready(s.as_str()),
            Some(_) => {
                self.warnings.push(format!("field `{field}` is not a string"));
                missing(section)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_json_body() {
        let err = interpret_response("<html>", None).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_missing_results() {
        let err = interpret_response(r#"{"success": true}"#, None).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));

        let err = interpret_response(r#"{"results": "nope"}"#, None).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn non_success_status_aborts_before_the_envelope() {
        let body = r#"{"detail": "Unsupported language: cobol"}"#;
        let err = interpret_http_response(400, body, None).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Http {
                status: 400,
                message: "Unsupported language: cobol".to_string(),
            }
        );

        // a well-formed success envelope still fails under a 500
        let err = interpret_http_response(500, r#"{"results": {}}"#, None).unwrap_err();
        assert_eq!(err.kind(), "http");

        assert!(interpret_http_response(200, r#"{"results": {}}"#, None).is_ok());
    }

    #[test]
    fn server_reported_failure_uses_message() {
        let err =
            interpret_response(r#"{"success": false, "error": "Unsupported language"}"#, None)
                .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ServerReported("Unsupported language".to_string())
        );

        let err = interpret_response(r#"{"success": false}"#, None).unwrap_err();
        assert_eq!(err.to_string(), "Analysis failed");
    }

    #[test]
    fn missing_fields_degrade_independently() {
        let body = r#"{"results": {"complexity_analysis": "Time Complexity: O(1)"}}"#;
        let report = interpret_response(body, None).unwrap();

        assert!(report.complexity.is_ready());
        assert_eq!(
            report.documentation,
            SectionOutcome::Unavailable("Documentation not available".to_string())
        );
        assert!(!report.refactoring.is_ready());
        assert!(!report.improvements.is_ready());
        assert!(!report.structure.is_ready());
        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings.iter().all(|w| w.starts_with("missing field")));
    }

    #[test]
    fn non_string_field_is_unavailable() {
        let body = r#"{"results": {"complexity_analysis": 42, "documentation": "ok",
            "refactoring_suggestions": "1. x", "improvement_suggestions": "y"}}"#;
        let report = interpret_response(body, None).unwrap();
        assert!(!report.complexity.is_ready());
        assert_eq!(report.warnings, vec!["field `complexity_analysis` is not a string"]);
    }

    #[test]
    fn unrequested_sections_are_skipped() {
        let req = AnalysisRequest::new(
            "def f():\n    pass",
            "python",
            vec![AnalysisOption::Complexity],
        );
        let body = r#"{"results": {"complexity_analysis": "O(n^2)"}}"#;
        let report = interpret_response(body, Some(&req)).unwrap();

        assert!(report.complexity.is_ready());
        assert_eq!(report.documentation, SectionOutcome::Skipped);
        assert_eq!(report.structure, SectionOutcome::Skipped);
        assert!(report.warnings.is_empty());
        assert_eq!(report.function_count, Some(1));
        assert_eq!(report.ready_sections(), vec![AnalysisOption::Complexity]);
    }

    #[test]
    fn analysis_id_accepts_numbers() {
        let report = interpret_response(r#"{"results": {"analysis_id": 17}}"#, None).unwrap();
        assert_eq!(report.analysis_id.as_deref(), Some("17"));
    }

    #[test]
    fn marker_text_gives_ready_but_empty_suggestions() {
        let body = r#"{"results": {"refactoring_suggestions": "No refactoring suggestions"}}"#;
        let report = interpret_response(body, None).unwrap();
        assert_eq!(report.refactoring, SectionOutcome::Ready(Vec::new()));
    }
}
