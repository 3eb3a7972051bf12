//! Refactoring-suggestion scraping.
//!
//! The service returns suggestions as a loosely formatted block: a header,
//! maybe a separator, then one suggestion per line with arbitrary numbering
//! or bullets. This is a best-effort line scraper, not a grammar, and it has
//! no failure mode.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Literal the service emits when it has nothing to suggest. Case-sensitive.
const NO_SUGGESTIONS_MARKER: &str = "No refactoring suggestions";

/// Number of leading suggestions that get [`Priority::High`].
const HIGH_PRIORITY_COUNT: usize = 2;

/// Category attached to every scraped suggestion.
pub const REFACTORING_CATEGORY: &str = "Refactoring";

static LINE_BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("line break regex must compile"));

/// Section headers: `REFACTORING SUGGESTIONS:`, `Suggestions`.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:refactoring|suggestions?)").expect("header regex must compile")
});

/// `===` / `---` separator rows.
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:={3,}|-{3,})$").expect("separator regex must compile")
});

/// Leading run of numbering and bullet glyphs: `1.`, `-`, `*`, `+`, `•`.
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d.\-*+•◦▪‣·\s]+").expect("bullet regex must compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
}

/// One scraped refactoring suggestion. Order in the returned sequence is
/// significant: priority is assigned by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefactoringSuggestion {
    /// 0-based position among the surviving lines.
    pub index: usize,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: &'static str,
}

impl RefactoringSuggestion {
    fn new(index: usize, description: String) -> Self {
        Self {
            index,
            title: format!("Suggestion {}", index + 1),
            description,
            priority: if index < HIGH_PRIORITY_COUNT {
                Priority::High
            } else {
                Priority::Medium
            },
            category: REFACTORING_CATEGORY,
        }
    }
}

/// Scrape an ordered list of suggestions out of free text.
///
/// Returns an empty list when the text is absent or blank, or when it carries
/// the "No refactoring suggestions" marker. If every line is filtered out as
/// a header, the header lines joined by spaces become a single suggestion.
pub fn extract_suggestions(text: Option<&str>) -> Vec<RefactoringSuggestion> {
    let Some(text) = text else {
        return Vec::new();
    };
    if text.trim().is_empty() || text.contains(NO_SUGGESTIONS_MARKER) {
        return Vec::new();
    }

    let lines: Vec<&str> = LINE_BREAKS_RE
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !SEPARATOR_RE.is_match(line))
        .collect();

    let suggestions: Vec<RefactoringSuggestion> = lines
        .iter()
        .filter(|line| !HEADER_RE.is_match(line))
        .map(|line| strip_bullet(line))
        .enumerate()
        .map(|(index, description)| RefactoringSuggestion::new(index, description))
        .collect();

    if suggestions.is_empty() {
        let description = if lines.is_empty() {
            text.trim().to_string()
        } else {
            lines.join(" ")
        };
        return vec![RefactoringSuggestion::new(0, description)];
    }

    suggestions
}

fn strip_bullet(line: &str) -> String {
    BULLET_RE.replace(line, "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
