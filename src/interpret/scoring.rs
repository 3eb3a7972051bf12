//! Color, level, and score tables for complexity tokens.
//!
//! Two lookup styles coexist and must not be unified:
//!
//! - [`color_for`] classifies by **substring** tests on the lowercased
//!   literal, in a fixed precedence order (first match wins). Tokens outside
//!   the canonical vocabulary still get a color.
//! - [`level_label`], [`performance_score`], and [`overall_score`] use
//!   **exact** lookup on the classified token and fall back to documented
//!   defaults for anything unrecognized.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::token::ComplexityToken;

// ---------------------------------------------------------------------------
// Color tiers and themes
// ---------------------------------------------------------------------------

/// Display tier a token is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Best,
    Good,
    Fair,
    Mid,
    Poor,
    Worst,
}

/// Dashboard palette. The hacker theme swaps colors and level wording only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Standard,
    Hacker,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Hacker => write!(f, "hacker"),
        }
    }
}

impl ColorTier {
    /// Hex color for this tier under the given theme.
    pub fn hex(self, theme: Theme) -> &'static str {
        match theme {
            Theme::Standard => match self {
                Self::Best => "#4CAF50",
                Self::Good => "#8BC34A",
                Self::Fair => "#FFC107",
                Self::Mid => "#FF9800",
                Self::Poor => "#FF5722",
                Self::Worst => "#F44336",
            },
            Theme::Hacker => match self {
                Self::Best => "#00FF41",
                Self::Good => "#39FF14",
                Self::Fair => "#FFFF00",
                Self::Mid => "#FFAA00",
                Self::Poor => "#FF6600",
                Self::Worst => "#FF0000",
            },
        }
    }
}

/// Pick the color tier for a token literal.
///
/// Precedence is part of the contract: `"O(n)"` contains `n`, so every
/// multi-character pattern runs before the bare `n` test, and `n log n` runs
/// before `log n` because it contains it.
pub fn color_for(token: &str) -> ColorTier {
    let t = token.to_lowercase();

    if t.contains('1') {
        ColorTier::Best
    } else if t.contains("n log n") {
        ColorTier::Fair
    } else if t.contains("log n") {
        ColorTier::Good
    } else if t.contains("n^2") || t.contains("n²") {
        ColorTier::Poor
    } else if t.contains("2^n") {
        ColorTier::Worst
    } else if t.contains('n') {
        ColorTier::Mid
    } else {
        ColorTier::Poor
    }
}

// ---------------------------------------------------------------------------
// Level labels
// ---------------------------------------------------------------------------

/// Qualitative label for a token, by exact match.
pub fn level_label(token: &ComplexityToken, theme: Theme) -> &'static str {
    use ComplexityToken::*;

    match theme {
        Theme::Standard => match token {
            Constant => "Excellent",
            Logarithmic => "Very Good",
            Linear => "Good",
            Linearithmic => "Fair",
            Quadratic(_) => "Poor",
            Exponential => "Very Poor",
            Unrecognized(_) => "Unknown",
        },
        Theme::Hacker => match token {
            Constant => "OPTIMAL",
            Logarithmic => "EFFICIENT",
            Linear => "ACCEPTABLE",
            Linearithmic => "MODERATE",
            Quadratic(_) => "CRITICAL",
            Exponential => "CATASTROPHIC",
            Unrecognized(_) => "UNKNOWN",
        },
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Default performance score for tokens outside the table.
const DEFAULT_PERFORMANCE: u8 = 50;

/// Severity used for an unrecognized time token.
const UNKNOWN_TIME_SEVERITY: u8 = 5;

/// Severity used for an unrecognized space token. Unknown space usage is
/// assumed cheap.
const UNKNOWN_SPACE_SEVERITY: u8 = 8;

/// Performance percentage (0–100) for a time token.
pub fn performance_score(time: &ComplexityToken) -> u8 {
    use ComplexityToken::*;

    match time {
        Constant => 95,
        Logarithmic => 85,
        Linear => 70,
        Linearithmic => 55,
        Quadratic(_) => 25,
        Exponential => 5,
        Unrecognized(_) => DEFAULT_PERFORMANCE,
    }
}

/// Severity table entry (1–10) for a recognized token.
fn severity(token: &ComplexityToken) -> Option<u8> {
    use ComplexityToken::*;

    match token {
        Constant => Some(10),
        Logarithmic => Some(8),
        Linear => Some(6),
        Linearithmic => Some(4),
        Quadratic(_) => Some(2),
        Exponential => Some(1),
        Unrecognized(_) => None,
    }
}

/// Overall 1–10 score: mean of the time and space severities, rounded half up.
pub fn overall_score(time: &ComplexityToken, space: &ComplexityToken) -> u8 {
    let t = severity(time).unwrap_or(UNKNOWN_TIME_SEVERITY);
    let s = severity(space).unwrap_or(UNKNOWN_SPACE_SEVERITY);
    (t + s).div_ceil(2)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
