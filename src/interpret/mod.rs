//! Complexity text interpreter.
//!
//! Turns the free-text sections of an analysis response into structured,
//! normalized facts:
//!
//! - [`extract_complexity`]: time/space tokens, colors, and scores
//! - [`suggestions::extract_suggestions`]: ordered refactoring suggestions
//! - [`functions::count_function_declarations`]: rough function count
//! - [`language::detect_language`]: language guess for undeclared code
//!
//! Every function here is pure and total. Regex extraction is a heuristic
//! scraper with fixed fallback rules, never a strict parser.

pub mod functions;
pub mod language;
pub mod scoring;
pub mod suggestions;
pub mod token;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use functions::count_function_declarations;
pub use language::{Language, detect_language};
pub use scoring::{ColorTier, Theme, color_for, level_label, overall_score, performance_score};
pub use suggestions::{Priority, RefactoringSuggestion, extract_suggestions};
pub use token::ComplexityToken;

// ---------------------------------------------------------------------------
// Compiled regexes
// ---------------------------------------------------------------------------

/// `Time Complexity: O(...)`, case-insensitive.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)time\s+complexity:\s*(O\([^)]+\))").expect("time regex must compile")
});

/// `Space Complexity: O(...)`, case-insensitive.
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)space\s+complexity:\s*(O\([^)]+\))").expect("space regex must compile")
});

/// Any free-standing `O(...)`. Case-sensitive so identifiers like `foo(x)`
/// don't qualify.
static BIG_O_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bO\([^)]+\)").expect("big-o regex must compile"));

const DEFAULT_TIME: &str = "O(n)";
const DEFAULT_SPACE: &str = "O(1)";

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Structured reading of one complexity-analysis text. Built once per
/// response and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityAssessment {
    pub time_token: ComplexityToken,
    pub time_color: ColorTier,
    pub space_token: ComplexityToken,
    pub space_color: ColorTier,
    /// 0–100, from the time token only.
    pub performance_score: u8,
    /// 1–10, from both tokens.
    pub overall_score: u8,
    /// The untouched input text.
    pub source_text: String,
}

impl ComplexityAssessment {
    fn from_tokens(time: &str, space: &str, source_text: &str) -> Self {
        let time_token = ComplexityToken::classify(time);
        let space_token = ComplexityToken::classify(space);

        Self {
            time_color: color_for(time),
            space_color: color_for(space),
            performance_score: performance_score(&time_token),
            overall_score: overall_score(&time_token, &space_token),
            time_token,
            space_token,
            source_text: source_text.to_string(),
        }
    }

    /// Level label for the time token.
    pub fn time_level(&self, theme: Theme) -> &'static str {
        level_label(&self.time_token, theme)
    }

    /// Level label for the space token.
    pub fn space_level(&self, theme: Theme) -> &'static str {
        level_label(&self.space_token, theme)
    }
}

/// Extract a complexity assessment from free text.
///
/// Time: labelled `Time Complexity:` match, else the first bare `O(...)`,
/// else `O(n)`. Space: labelled `Space Complexity:` match, else `O(1)` (no
/// bare fallback for space). Returns `None` only when there is no text.
pub fn extract_complexity(text: Option<&str>) -> Option<ComplexityAssessment> {
    let text = text?;

    let time = TIME_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .or_else(|| BIG_O_RE.find(text))
        .map_or(DEFAULT_TIME, |m| m.as_str());

    let space = SPACE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(DEFAULT_SPACE, |m| m.as_str());

    Some(ComplexityAssessment::from_tokens(time, space, text))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_yields_none() {
        assert!(extract_complexity(None).is_none());
    }

    #[test]
    fn labelled_tokens_are_extracted() {
        let a = extract_complexity(Some("Time Complexity: O(n log n)\nSpace Complexity: O(n)"))
            .unwrap();
        assert_eq!(a.time_token.as_str(), "O(n log n)");
        assert_eq!(a.space_token.as_str(), "O(n)");
        assert_eq!(a.time_color, ColorTier::Fair);
        assert_eq!(a.space_color, ColorTier::Mid);
        assert_eq!(a.performance_score, 55);
        // (4 + 6) / 2
        assert_eq!(a.overall_score, 5);
    }

    #[test]
    fn labels_are_case_insensitive() {
        let a = extract_complexity(Some("TIME COMPLEXITY:O(1)\nspace complexity: O(log n)"))
            .unwrap();
        assert_eq!(a.time_token, ComplexityToken::Constant);
        assert_eq!(a.space_token, ComplexityToken::Logarithmic);
    }

    #[test]
    fn time_falls_back_to_bare_big_o() {
        let a = extract_complexity(Some("no explicit labels but O(log n) appears")).unwrap();
        assert_eq!(a.time_token.as_str(), "O(log n)");
        assert_eq!(a.space_token.as_str(), "O(1)");
    }

    #[test]
    fn space_has_no_bare_fallback() {
        let a = extract_complexity(Some("Time Complexity: O(n^2) and memory is O(n)")).unwrap();
        assert_eq!(a.time_token.as_str(), "O(n^2)");
        assert_eq!(a.space_token.as_str(), "O(1)");
    }

    #[test]
    fn defaults_when_nothing_matches() {
        let a = extract_complexity(Some("The code looks fine.")).unwrap();
        assert_eq!(a.time_token, ComplexityToken::Linear);
        assert_eq!(a.space_token, ComplexityToken::Constant);
        assert_eq!(a.performance_score, 70);
        assert_eq!(a.overall_score, 8);
        assert_eq!(a.source_text, "The code looks fine.");
    }

    #[test]
    fn unrecognized_tokens_keep_their_literal() {
        let a = extract_complexity(Some("Time Complexity: O(n^3)")).unwrap();
        assert_eq!(a.time_token.as_str(), "O(n^3)");
        assert!(!a.time_token.is_recognized());
        assert_eq!(a.performance_score, 50);
        assert_eq!(a.time_level(Theme::Standard), "Unknown");
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "Time Complexity: O(2^n)\nSpace Complexity: O(n²)";
        assert_eq!(extract_complexity(Some(text)), extract_complexity(Some(text)));
    }
}
