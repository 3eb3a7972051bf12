use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::response::{AnalysisError, DashboardReport};

// ---------------------------------------------------------------------------
// Analysis log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the analysis log (`~/.codelens/analysis-log.jsonl`).
///
/// One entry per interpreted response, successful or not. Used by the
/// reporter for `codelens stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisLogEntry {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub analysis_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub language: Option<String>,
    /// Time-complexity literal, when the complexity section was readable.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub space_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub performance_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub overall_score: Option<u8>,
    #[serde(default)]
    pub suggestion_count: usize,
    /// Sections that produced content, e.g. `["complexity", "refactoring"]`.
    #[serde(default)]
    pub ready_sections: Vec<String>,
    #[serde(default)]
    pub warnings: usize,
    #[serde(default = "default_true")]
    pub success: bool,
    /// Error kind for failed cycles (see [`AnalysisError::kind`]).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

fn default_true() -> bool {
    true
}

impl AnalysisLogEntry {
    /// Build an entry for a successfully interpreted report.
    pub fn from_report(report: &DashboardReport, language: Option<&str>) -> Self {
        let assessment = report.complexity.ready();

        Self {
            timestamp: Utc::now().to_rfc3339(),
            analysis_id: report.analysis_id.clone(),
            language: language.map(str::to_string),
            time_token: assessment.map(|a| a.time_token.to_string()),
            space_token: assessment.map(|a| a.space_token.to_string()),
            performance_score: assessment.map(|a| a.performance_score),
            overall_score: assessment.map(|a| a.overall_score),
            suggestion_count: report.refactoring.ready().map_or(0, Vec::len),
            ready_sections: report
                .ready_sections()
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            warnings: report.warnings.len(),
            success: true,
            error: None,
        }
    }

    /// Build an entry for an aborted cycle.
    pub fn from_error(error: &AnalysisError, language: Option<&str>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            analysis_id: None,
            language: language.map(str::to_string),
            time_token: None,
            space_token: None,
            performance_score: None,
            overall_score: None,
            suggestion_count: 0,
            ready_sections: Vec::new(),
            warnings: 0,
            success: false,
            error: Some(error.kind().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Append an entry to the log at `path`. Best-effort: failures are ignored.
pub fn log_analysis(path: &Path, entry: &AnalysisLogEntry) {
    let _ = append_jsonl(path, entry);
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all entries from the log at `path`.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<AnalysisLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<AnalysisLogEntry>(&line).ok())
        .collect()
}

/// Read log entries filtered to a time window (last N days).
///
/// If `days` is `None`, returns all entries.
pub fn read_entries_since_days(path: &Path, days: Option<u32>) -> Vec<AnalysisLogEntry> {
    let entries = read_all_entries(path);

    let Some(days) = days else {
        return entries;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    let cutoff_str = cutoff.to_rfc3339();

    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff_str)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

pub(crate) fn append_jsonl<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(value)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
