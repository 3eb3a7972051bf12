//! Derived dashboard percentages.
//!
//! These are display heuristics shown as progress bars, not measurements.

use serde::Serialize;

use crate::interpret::{ComplexityAssessment, RefactoringSuggestion};

use super::SectionOutcome;

/// Score used when the section feeding a percentage is unavailable.
const NEUTRAL_SCORE: u8 = 50;

const DOC_BASE: u8 = 60;
const DOC_PER_LINE: usize = 5;
const DOC_MISSING: u8 = 40;

const TESTING_PENALTY_PER_SUGGESTION: usize = 10;
const TESTING_FLOOR: u8 = 30;

/// Percentages (0–100) shown on the overview tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayScores {
    pub performance: u8,
    pub readability: u8,
    pub documentation: u8,
    pub testing: u8,
}

impl DisplayScores {
    pub fn derive(
        complexity: &SectionOutcome<ComplexityAssessment>,
        documentation: &SectionOutcome<String>,
        refactoring: &SectionOutcome<Vec<RefactoringSuggestion>>,
    ) -> Self {
        let (performance, readability) = match complexity.ready() {
            Some(a) => (a.performance_score, a.overall_score * 10),
            None => (NEUTRAL_SCORE, NEUTRAL_SCORE),
        };

        let documentation = match documentation.ready() {
            Some(text) => {
                let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
                let bonus = (lines * DOC_PER_LINE).min(usize::from(100 - DOC_BASE));
                DOC_BASE + bonus as u8
            }
            None => DOC_MISSING,
        };

        let suggestion_count = refactoring.ready().map_or(0, Vec::len);
        let penalty = suggestion_count.saturating_mul(TESTING_PENALTY_PER_SUGGESTION);
        let testing = 100usize
            .saturating_sub(penalty)
            .max(usize::from(TESTING_FLOOR)) as u8;

        Self {
            performance,
            readability,
            documentation,
            testing,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
