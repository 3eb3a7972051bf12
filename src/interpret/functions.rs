//! Rough function-declaration counter.
//!
//! Counts declaration-looking matches across a handful of language families.
//! This is a display heuristic, not a parser. Comments are stripped first, but
//! string contents and nested definitions are still counted if they look like
//! declarations. The result is clamped to at least 1 so per-function averages
//! never divide by zero.

use std::sync::LazyLock;

use regex::Regex;

/// Comment forms removed before matching, in order. Block forms go first so
/// a `//` inside `/* ... */` can't cut a block comment short.
static COMMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // C family block comments
        r"(?s)/\*.*?\*/",
        // Python docstrings
        r#"(?s)""".*?"""|'''.*?'''"#,
        // C family / Go / Rust / Java line comments
        r"//[^\n]*",
        // Python / shell comments. Requires whitespace after `#` so that
        // `#include`, `#define` and `#[attr]` survive.
        r"(?m)(?:^|[ \t])#(?:[ \t#][^\n]*)?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("comment regex must compile"))
    .collect()
});

/// Independent declaration patterns. Matches are summed across all of them.
static DECLARATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // JavaScript / TypeScript / PHP: function foo(
        r"\bfunction\s+\w+\s*\(",
        // JavaScript arrow bindings: const foo = (a) => / let foo = async x =>
        r"\b(?:const|let|var)\s+\w+\s*=\s*(?:async\s+)?(?:\([^)]*\)|\w+)\s*=>",
        // Python / Ruby: def foo
        r"\bdef\s+\w+",
        // Rust: fn foo
        r"\bfn\s+\w+",
        // Go: func foo( / func (r *Recv) foo(
        r"\bfunc\s+(?:\([^)]*\)\s*)?\w+\s*\(",
        // Java / C# / C++ methods with an access or storage modifier
        concat!(
            r"\b(?:public|private|protected|static|internal)\s+",
            r"(?:[\w<>\[\],]+\s+)+\w+\s*\([^)]*\)\s*\{",
        ),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("declaration regex must compile"))
    .collect()
});

/// C / C++ definitions with a leading return type: `int main(void) {`,
/// `std::vector<int> build(int n) {`, `int Widget::size() const {`.
/// Group 1 holds the type words, group 2 the function name.
static TYPED_DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*((?:[A-Za-z_][\w:<>,]*[ \t*&]+)+)",
        r"([A-Za-z_][\w:]*)\s*\([^)]*\)\s*(?:const\s*)?\{",
    ))
    .expect("typed definition regex must compile")
});

/// First words that belong to another pattern or to a statement, not a type.
const NON_TYPE_LEADERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "internal",
    "function",
    "async",
    "export",
    "func",
    "fn",
    "pub",
    "def",
    "else",
    "return",
    "new",
    "throw",
    "case",
    "class",
];

/// Control keywords that look like calls followed by a block.
const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "catch", "sizeof", "return"];

/// Count function declarations in source code, never returning less than 1.
pub fn count_function_declarations(code: &str) -> usize {
    let code = strip_comments(code);
    let total: usize = DECLARATION_PATTERNS
        .iter()
        .map(|re| re.find_iter(&code).count())
        .sum();
    (total + count_typed_definitions(&code)).max(1)
}

fn strip_comments(code: &str) -> String {
    COMMENT_PATTERNS
        .iter()
        .fold(code.to_string(), |acc, re| re.replace_all(&acc, " ").into_owned())
}

fn count_typed_definitions(code: &str) -> usize {
    TYPED_DEFINITION_RE
        .captures_iter(code)
        .filter(|caps| {
            let leader = caps[1]
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .next()
                .unwrap_or_default();
            !NON_TYPE_LEADERS.contains(&leader) && !CONTROL_KEYWORDS.contains(&&caps[2])
        })
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
