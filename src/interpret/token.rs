//! Canonical asymptotic-complexity tokens.
//!
//! The analysis service writes complexity as free text, so a token is always
//! the literal `O(...)` substring that was matched. Scoring only recognizes a
//! fixed vocabulary by exact string comparison; everything else is kept as
//! [`ComplexityToken::Unrecognized`] and falls through to table defaults.

use std::fmt;

use serde::{Serialize, Serializer};

/// A matched Big-O token, classified against the fixed scoring vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComplexityToken {
    /// `O(1)`
    Constant,
    /// `O(log n)`
    Logarithmic,
    /// `O(n)`
    Linear,
    /// `O(n log n)`
    Linearithmic,
    /// `O(n²)` or `O(n^2)`; the original spelling is preserved.
    Quadratic(QuadraticSpelling),
    /// `O(2^n)`
    Exponential,
    /// Any other literal, e.g. `O(n^3)` or `O(N)`.
    Unrecognized(String),
}

/// The two accepted spellings of the quadratic token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadraticSpelling {
    Superscript,
    Caret,
}

impl ComplexityToken {
    /// Classify a literal by exact string match. No normalization is done:
    /// `"O(N)"` or `"O( n )"` are unrecognized.
    pub fn classify(literal: &str) -> Self {
        match literal {
            "O(1)" => Self::Constant,
            "O(log n)" => Self::Logarithmic,
            "O(n)" => Self::Linear,
            "O(n log n)" => Self::Linearithmic,
            "O(n²)" => Self::Quadratic(QuadraticSpelling::Superscript),
            "O(n^2)" => Self::Quadratic(QuadraticSpelling::Caret),
            "O(2^n)" => Self::Exponential,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The literal text of this token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic(QuadraticSpelling::Superscript) => "O(n²)",
            Self::Quadratic(QuadraticSpelling::Caret) => "O(n^2)",
            Self::Exponential => "O(2^n)",
            Self::Unrecognized(s) => s,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for ComplexityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComplexityToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
