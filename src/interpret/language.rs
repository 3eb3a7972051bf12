//! Source-language guessing for submitted code.
//!
//! Used when the caller doesn't declare a language. The file extension wins
//! when it is known; otherwise each language scores one point per keyword
//! occurrence and the highest score wins.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Languages the analysis service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Python,
    Java,
    C,
    Go,
    Rust,
}

impl Language {
    /// Every language, in tie-break order.
    pub const ALL: [Language; 6] = [
        Language::Cpp,
        Language::Python,
        Language::Java,
        Language::C,
        Language::Go,
        Language::Rust,
    ];

    /// Wire name sent in the request's `language` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    /// Parse a user-supplied name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Some(Language::Cpp),
            "python" | "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "c" => Some(Language::C),
            "go" | "golang" => Some(Language::Go),
            "rust" | "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// Map a file extension (without the dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "c" | "h" => Some(Language::C),
            "cc" | "cpp" | "cxx" | "hpp" | "hh" => Some(Language::Cpp),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::Cpp => &["#include", "using namespace", "cout", "cin", "std::"],
            Language::Python => &[
                "def ", "import ", "from ", "class ", "elif", "None", "True", "False",
            ],
            Language::Java => &[
                "public class",
                "private ",
                "public ",
                "import java",
                "System.out",
            ],
            Language::C => &["#include", "printf", "scanf", "malloc", "free"],
            Language::Go => &["func ", "package ", "import ", "fmt.", "var "],
            Language::Rust => &["fn ", "let ", "mut ", "impl ", "use ", "println!"],
        }
    }

    fn keyword_score(self, code: &str) -> usize {
        self.keywords()
            .iter()
            .map(|kw| code.matches(kw).count())
            .sum()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess the language of `code`, optionally helped by its file name.
///
/// Returns `None` when the extension is unknown and no keyword matched.
/// Equal scores resolve in [`Language::ALL`] order.
pub fn detect_language(code: &str, path: Option<&Path>) -> Option<Language> {
    if let Some(lang) = path
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
    {
        return Some(lang);
    }

    let mut best: Option<(Language, usize)> = None;
    for lang in Language::ALL {
        let score = lang.keyword_score(code);
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((lang, score));
        }
    }
    best.map(|(lang, _)| lang)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
