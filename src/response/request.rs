//! Request descriptor for the analysis service.
//!
//! Describes what the user submitted: the code, its declared language, and
//! the selected analysis modules. Transport is someone else's job; this type
//! only validates required input and lays out the form fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

/// Fixed endpoint path the form is posted to.
pub const ANALYZE_ENDPOINT: &str = "/analyze/code";

/// One selectable analysis module. Each maps to one dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOption {
    Complexity,
    Documentation,
    Refactoring,
    Structure,
    Improvements,
}

impl AnalysisOption {
    pub const ALL: [AnalysisOption; 5] = [
        Self::Complexity,
        Self::Documentation,
        Self::Refactoring,
        Self::Structure,
        Self::Improvements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complexity => "complexity",
            Self::Documentation => "documentation",
            Self::Refactoring => "refactoring",
            Self::Structure => "structure",
            Self::Improvements => "improvements",
        }
    }
}

impl fmt::Display for AnalysisOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complexity" => Ok(Self::Complexity),
            "documentation" | "docs" => Ok(Self::Documentation),
            "refactoring" => Ok(Self::Refactoring),
            "structure" => Ok(Self::Structure),
            "improvements" | "improvement" => Ok(Self::Improvements),
            other => Err(format!("unknown analysis option: {other}")),
        }
    }
}

/// Parse a comma-separated option list, skipping blanks.
pub fn parse_options(list: &str) -> Result<Vec<AnalysisOption>, String> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// What the user submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: String,
    pub options: Vec<AnalysisOption>,
}

impl AnalysisRequest {
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        options: Vec<AnalysisOption>,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            options,
        }
    }

    /// Reject requests that must never be sent: blank code or no options.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.code.trim().is_empty() {
            return Err(AnalysisError::EmptyCode);
        }
        if self.options.is_empty() {
            return Err(AnalysisError::NoOptionsSelected);
        }
        Ok(())
    }

    pub fn is_selected(&self, option: AnalysisOption) -> bool {
        self.options.contains(&option)
    }

    /// Multipart form fields in submission order.
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        let options = self
            .options
            .iter()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(",");

        [
            ("code", self.code.clone()),
            ("language", self.language.clone()),
            ("options", options),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_code() {
        let req = AnalysisRequest::new("   \n", "python", AnalysisOption::ALL.to_vec());
        assert_eq!(req.validate(), Err(AnalysisError::EmptyCode));
    }

    #[test]
    fn validate_rejects_no_options() {
        let req = AnalysisRequest::new("print(1)", "python", Vec::new());
        assert_eq!(req.validate(), Err(AnalysisError::NoOptionsSelected));
    }

    #[test]
    fn blank_code_is_reported_before_missing_options() {
        let req = AnalysisRequest::new("", "python", Vec::new());
        assert_eq!(req.validate(), Err(AnalysisError::EmptyCode));
    }

    #[test]
    fn form_fields_join_options() {
        let req = AnalysisRequest::new(
            "def f(): pass",
            "python",
            vec![AnalysisOption::Complexity, AnalysisOption::Refactoring],
        );
        let fields = req.form_fields();
        assert_eq!(fields[0], ("code", "def f(): pass".to_string()));
        assert_eq!(fields[1], ("language", "python".to_string()));
        assert_eq!(fields[2], ("options", "complexity,refactoring".to_string()));
    }

    #[test]
    fn parse_options_accepts_aliases_and_blanks() {
        let opts = parse_options("complexity, docs,,Improvements").unwrap();
        assert_eq!(
            opts,
            vec![
                AnalysisOption::Complexity,
                AnalysisOption::Documentation,
                AnalysisOption::Improvements
            ]
        );
        assert!(parse_options("complexity,bogus").is_err());
        assert!(parse_options("").unwrap().is_empty());
    }
}
