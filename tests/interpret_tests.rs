/// Integration tests for the text interpreter.
///
/// Unit tests for each table live in the submodules' `#[cfg(test)]` blocks.
/// These tests exercise the public surface end to end: classification,
/// scoring, coloring, extraction, and purity across repeated calls.
use codelens::interpret::{
    ColorTier, ComplexityToken, Priority, Theme, color_for, count_function_declarations,
    extract_complexity, extract_suggestions, level_label, overall_score, performance_score,
};

const CANONICAL: [(&str, &str, u8, u8); 7] = [
    ("O(1)", "Excellent", 95, 10),
    ("O(log n)", "Very Good", 85, 8),
    ("O(n)", "Good", 70, 6),
    ("O(n log n)", "Fair", 55, 4),
    ("O(n²)", "Poor", 25, 2),
    ("O(n^2)", "Poor", 25, 2),
    ("O(2^n)", "Very Poor", 5, 1),
];

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

#[test]
fn canonical_tokens_hit_exact_table_values() {
    for (literal, label, perf, severity) in CANONICAL {
        let token = ComplexityToken::classify(literal);
        assert!(token.is_recognized(), "{literal} should be recognized");
        assert_eq!(level_label(&token, Theme::Standard), label, "{literal}");
        assert_eq!(performance_score(&token), perf, "{literal}");
        // Same severity on both sides makes the mean equal to the severity.
        assert_eq!(overall_score(&token, &token), severity, "{literal}");
    }
}

#[test]
fn unrecognized_tokens_fall_back_to_defaults() {
    for literal in ["O(n^3)", "O(N)", "O(n!)", "O( n )", ""] {
        let token = ComplexityToken::classify(literal);
        assert!(!token.is_recognized());
        assert_eq!(level_label(&token, Theme::Standard), "Unknown");
        assert_eq!(level_label(&token, Theme::Hacker), "UNKNOWN");
        assert_eq!(performance_score(&token), 50);
    }

    let unknown = ComplexityToken::classify("O(n^3)");
    let constant = ComplexityToken::classify("O(1)");
    // unknown time (5) with constant space (10) -> 7.5 -> 8
    assert_eq!(overall_score(&unknown, &constant), 8);
    // constant time (10) with unknown space (8) -> 9
    assert_eq!(overall_score(&constant, &unknown), 9);
}

#[test]
fn overall_score_documented_examples() {
    let c = |s: &str| ComplexityToken::classify(s);
    assert_eq!(overall_score(&c("O(1)"), &c("O(1)")), 10);
    assert_eq!(overall_score(&c("O(n)"), &c("O(1)")), 8);
    assert_eq!(overall_score(&c("O(n^2)"), &c("O(n^2)")), 2);
    // (4 + 1) / 2 = 2.5 rounds half up
    assert_eq!(overall_score(&c("O(n log n)"), &c("O(2^n)")), 3);
}

#[test]
fn overall_score_stays_in_range() {
    for (time, _, _, _) in CANONICAL {
        for (space, _, _, _) in CANONICAL {
            let score = overall_score(
                &ComplexityToken::classify(time),
                &ComplexityToken::classify(space),
            );
            assert!((1..=10).contains(&score), "{time}/{space} -> {score}");
        }
    }
}

// ---------------------------------------------------------------------------
// Color precedence
// ---------------------------------------------------------------------------

#[test]
fn color_precedence_prefers_specific_patterns() {
    assert_eq!(color_for("O(1)"), ColorTier::Best);
    assert_eq!(color_for("O(log n)"), ColorTier::Good);
    assert_eq!(color_for("O(n log n)"), ColorTier::Fair);
    assert_eq!(color_for("O(n^2)"), ColorTier::Poor);
    assert_eq!(color_for("O(n²)"), ColorTier::Poor);
    assert_eq!(color_for("O(2^n)"), ColorTier::Worst);
    assert_eq!(color_for("O(n)"), ColorTier::Mid);
}

#[test]
fn color_is_substring_based_and_case_insensitive() {
    assert_eq!(color_for("O(N LOG N)"), ColorTier::Fair);
    assert_eq!(color_for("O(n + m)"), ColorTier::Mid);
    // any "1" wins first, even in an otherwise exponential token
    assert_eq!(color_for("O(1.5^n)"), ColorTier::Best);
    assert_eq!(color_for("O(k)"), ColorTier::Poor);
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[test]
fn extract_complexity_absent_input() {
    assert_eq!(extract_complexity(None), None);
}

#[test]
fn extract_complexity_labeled_tokens() {
    let text = "Time Complexity: O(n log n)\nSpace Complexity: O(n)";
    let a = extract_complexity(Some(text)).unwrap();
    assert_eq!(a.time_token.as_str(), "O(n log n)");
    assert_eq!(a.space_token.as_str(), "O(n)");
    assert_eq!(a.time_color, ColorTier::Fair);
    assert_eq!(a.space_color, ColorTier::Mid);
    assert_eq!(a.performance_score, 55);
    assert_eq!(a.overall_score, 5);
}

#[test]
fn extract_complexity_bare_fallback() {
    let a = extract_complexity(Some("no explicit labels but O(log n) appears")).unwrap();
    assert_eq!(a.time_token.as_str(), "O(log n)");
    assert_eq!(a.space_token.as_str(), "O(1)");
}

#[test]
fn extract_complexity_keeps_source_and_defaults() {
    let text = "The algorithm is fine.";
    let a = extract_complexity(Some(text)).unwrap();
    assert_eq!(a.time_token.as_str(), "O(n)");
    assert_eq!(a.space_token.as_str(), "O(1)");
    assert_eq!(a.source_text, text);
    assert_eq!(a.time_level(Theme::Hacker), "ACCEPTABLE");
}

#[test]
fn extract_suggestions_marker_gives_empty() {
    assert!(extract_suggestions(Some("No refactoring suggestions")).is_empty());
    assert!(extract_suggestions(None).is_empty());
}

#[test]
fn extract_suggestions_numbered_list() {
    let list = extract_suggestions(Some(
        "1. Extract method\n2. Rename variable\n3. Remove dead code",
    ));
    assert_eq!(list.len(), 3);

    let descriptions: Vec<&str> = list.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["Extract method", "Rename variable", "Remove dead code"]
    );
    assert_eq!(list[0].priority, Priority::High);
    assert_eq!(list[1].priority, Priority::High);
    assert_eq!(list[2].priority, Priority::Medium);
    assert!(list.iter().all(|s| s.category == "Refactoring"));
    assert_eq!(list[2].index, 2);
}

#[test]
fn extract_suggestions_skips_headers_and_bullets() {
    let list = extract_suggestions(Some(
        "REFACTORING SUGGESTIONS\n=====\n\n- Split the loop\n\
         * Inline the helper\n-----\n• Add tests",
    ));
    let descriptions: Vec<&str> = list.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["Split the loop", "Inline the helper", "Add tests"]
    );
}

#[test]
fn function_count_floor_is_one() {
    assert_eq!(count_function_declarations(""), 1);
    assert_eq!(count_function_declarations("x = 1"), 1);
    assert_eq!(
        count_function_declarations("def a():\n    pass\n\ndef b():\n    pass\n"),
        2
    );
}

// ---------------------------------------------------------------------------
// Purity
// ---------------------------------------------------------------------------

#[test]
fn repeated_calls_are_identical() {
    let complexity = "Time Complexity: O(n^2)\nSpace Complexity: O(log n)";
    assert_eq!(
        extract_complexity(Some(complexity)),
        extract_complexity(Some(complexity))
    );

    let suggestions = "1. a\n2. b\n3. c";
    assert_eq!(
        extract_suggestions(Some(suggestions)),
        extract_suggestions(Some(suggestions))
    );

    let code = "function f() {}\nconst g = () => 1;";
    assert_eq!(
        count_function_declarations(code),
        count_function_declarations(code)
    );
    assert_eq!(color_for("O(n)"), color_for("O(n)"));
}
