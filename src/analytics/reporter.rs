//! Analytics reporter: aggregate stats over the analysis log.

use std::collections::HashMap;
use std::path::Path;

use crate::analytics::logger::{self, AnalysisLogEntry};

// ---------------------------------------------------------------------------
// Aggregated stats
// ---------------------------------------------------------------------------

/// Summary statistics for `codelens stats`.
#[derive(Debug, Default)]
pub struct Stats {
    pub total_analyses: usize,
    pub failures: usize,
    /// Average over entries that had a readable complexity section.
    pub avg_performance_score: f64,
    pub avg_overall_score: f64,
    pub total_suggestions: usize,
    /// Time-token distribution, most frequent first.
    pub token_stats: Vec<TokenStat>,
    /// Failure count per error kind, most frequent first.
    pub error_kinds: Vec<(String, usize)>,
}

/// How often one time-complexity token was seen.
#[derive(Debug, Clone)]
pub struct TokenStat {
    pub token: String,
    pub count: usize,
    pub avg_performance_score: f64,
}

impl Stats {
    /// Share of analyses that succeeded, as a percentage.
    pub fn success_pct(&self) -> f64 {
        if self.total_analyses == 0 {
            0.0
        } else {
            let ok = self.total_analyses - self.failures;
            (ok as f64 / self.total_analyses as f64) * 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// Stats computation
// ---------------------------------------------------------------------------

/// Compute aggregate stats from the log at `path`, optionally filtered to
/// the last `days` days.
pub fn compute_stats(path: &Path, days: Option<u32>) -> Stats {
    let entries = logger::read_entries_since_days(path, days);
    build_stats(&entries)
}

fn build_stats(entries: &[AnalysisLogEntry]) -> Stats {
    if entries.is_empty() {
        return Stats::default();
    }

    let failures = entries.iter().filter(|e| !e.success).count();

    let scored: Vec<&AnalysisLogEntry> = entries
        .iter()
        .filter(|e| e.performance_score.is_some())
        .collect();

    Stats {
        total_analyses: entries.len(),
        failures,
        avg_performance_score: average(scored.iter().filter_map(|e| e.performance_score)),
        avg_overall_score: average(scored.iter().filter_map(|e| e.overall_score)),
        total_suggestions: entries.iter().map(|e| e.suggestion_count).sum(),
        token_stats: compute_token_stats(&scored),
        error_kinds: compute_error_kinds(entries),
    }
}

fn average(values: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + u64::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Group scored entries by time token.
///
/// Returns sorted by count (descending), ties broken by token text.
fn compute_token_stats(entries: &[&AnalysisLogEntry]) -> Vec<TokenStat> {
    let mut groups: HashMap<&str, Vec<&AnalysisLogEntry>> = HashMap::new();
    for entry in entries {
        if let Some(token) = entry.time_token.as_deref() {
            groups.entry(token).or_default().push(*entry);
        }
    }

    let mut stats: Vec<TokenStat> = groups
        .into_iter()
        .map(|(token, group)| TokenStat {
            token: token.to_string(),
            count: group.len(),
            avg_performance_score: average(group.iter().filter_map(|e| e.performance_score)),
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
    stats
}

fn compute_error_kinds(entries: &[AnalysisLogEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if let Some(kind) = entry.error.as_deref() {
            *counts.entry(kind).or_default() += 1;
        }
    }

    let mut kinds: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect();
    kinds.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    kinds
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::AnalysisError;

    fn scored(token: &str, perf: u8, overall: u8, suggestions: usize) -> AnalysisLogEntry {
        AnalysisLogEntry {
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            analysis_id: None,
            language: Some("python".to_string()),
            time_token: Some(token.to_string()),
            space_token: Some("O(1)".to_string()),
            performance_score: Some(perf),
            overall_score: Some(overall),
            suggestion_count: suggestions,
            ready_sections: vec!["complexity".to_string()],
            warnings: 0,
            success: true,
            error: None,
        }
    }

    #[test]
    fn empty_log_gives_zeroes() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.success_pct(), 0.0);
        assert!(stats.token_stats.is_empty());
    }

    #[test]
    fn aggregates_scores_tokens_and_failures() {
        let entries = vec![
            scored("O(n)", 70, 8, 2),
            scored("O(n)", 70, 6, 1),
            scored("O(1)", 95, 10, 0),
            AnalysisLogEntry::from_error(&AnalysisError::ServerReported("x".into()), None),
        ];
        let stats = build_stats(&entries);

        assert_eq!(stats.total_analyses, 4);
        assert_eq!(stats.failures, 1);
        assert!((stats.success_pct() - 75.0).abs() < f64::EPSILON);
        assert!((stats.avg_performance_score - 235.0 / 3.0).abs() < 1e-9);
        assert!((stats.avg_overall_score - 8.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_suggestions, 3);

        assert_eq!(stats.token_stats[0].token, "O(n)");
        assert_eq!(stats.token_stats[0].count, 2);
        assert_eq!(stats.token_stats[1].token, "O(1)");

        assert_eq!(stats.error_kinds, vec![("server_reported".to_string(), 1)]);
    }
}
