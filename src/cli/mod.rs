//! CLI command implementations for codelens.
//!
//! Provides subcommand handlers for:
//! - `codelens interpret`: interpret a full service response into a dashboard
//! - `codelens complexity`: parse a raw complexity block
//! - `codelens suggestions`: split a raw refactoring block into suggestions
//! - `codelens functions`: heuristic function count of a source file
//! - `codelens stats`: summary of the local analysis log
//! - `codelens config show|init|set|reset`: configuration management

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::reporter::{self, Stats};
use crate::analytics::{events, logger};
use crate::config::{self, CodelensConfig};
use crate::interpret::{
    Language, Theme, count_function_declarations, detect_language, extract_complexity,
    extract_suggestions,
};
use crate::response::{
    self, AnalysisError, AnalysisOption, AnalysisRequest, DashboardReport, interpret_response,
    parse_options,
};
use crate::view::{self, AnalysisSession, DashboardView, TerminalView};

/// Output format for the stats command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Display overrides shared by the interpreting commands. `None` falls back
/// to the configured value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayArgs<'a> {
    pub format: Option<&'a str>,
    pub theme: Option<&'a str>,
}

/// Arguments of `codelens interpret`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpretArgs<'a> {
    /// Response body file; `None` or `-` reads stdin.
    pub response: Option<&'a Path>,
    /// Source file that was submitted. Enables request validation, section
    /// selection and the function count.
    pub code: Option<&'a Path>,
    pub language: Option<&'a str>,
    /// Comma-separated analysis options.
    pub options: Option<&'a str>,
    /// HTTP status the body arrived with. `None` assumes a 2xx response.
    pub status: Option<u16>,
    pub display: DisplayArgs<'a>,
}

// ---------------------------------------------------------------------------
// codelens interpret
// ---------------------------------------------------------------------------

/// Interpret a service response and render it.
///
/// Returns `Ok(false)` when the cycle was aborted by an [`AnalysisError`];
/// the error has already been rendered and logged.
pub fn run_interpret(args: InterpretArgs<'_>) -> Result<bool> {
    let cfg = config::load();
    let (format, theme) = resolve_display(&cfg, args.display)?;

    let request = match args.code {
        Some(path) => Some(build_request(&cfg, path, args.language, args.options)?),
        None => None,
    };
    let language = request.as_ref().map(|r| r.language.as_str());

    let validated = match &request {
        Some(req) => req.validate(),
        None => Ok(()),
    };
    let outcome = match validated {
        Ok(()) => {
            let body = read_input(args.response)?;
            interpret_body(args.status, &body, request.as_ref())
        }
        Err(err) => Err(err),
    };

    let mut session = AnalysisSession::new(theme);
    match outcome {
        Ok(report) => {
            record_report(&cfg, &report, language);
            match format {
                config::OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                config::OutputFormat::Table => {
                    let mut view = TerminalView::stdout(cfg.display.show_source);
                    view::render_report(&mut view, &mut session, &report);
                    if let Some(count) = report.function_count {
                        println!();
                        println!("  {} {}", "Functions:".bold(), count);
                    }
                }
            }
            Ok(true)
        }
        Err(err) => {
            record_error(&cfg, &err, language);
            match format {
                config::OutputFormat::Json => print_error_json(&err)?,
                config::OutputFormat::Table => {
                    let mut view = TerminalView::new(io::stderr(), false);
                    view::render_error(&mut view, &session, &err);
                }
            }
            Ok(false)
        }
    }
}

/// Non-2xx statuses take the same error path as every other aborted cycle.
fn interpret_body(
    status: Option<u16>,
    body: &str,
    request: Option<&AnalysisRequest>,
) -> Result<DashboardReport, AnalysisError> {
    match status {
        Some(status) => response::interpret_http_response(status, body, request),
        None => interpret_response(body, request),
    }
}

/// Language precedence: `--language`, then a guess from the file, then the
/// configured default.
fn build_request(
    cfg: &CodelensConfig,
    code_path: &Path,
    language: Option<&str>,
    options: Option<&str>,
) -> Result<AnalysisRequest> {
    let code = read_input(Some(code_path))?;
    let language = match language {
        Some(raw) => Language::from_name(raw).map_or(raw, |l| l.as_str()),
        None => detect_language(&code, Some(code_path))
            .map_or(cfg.request.language.as_str(), |l| l.as_str()),
    };
    let options = match options {
        Some(list) => parse_options(list).map_err(anyhow::Error::msg)?,
        None => cfg.request.options.clone(),
    };
    Ok(AnalysisRequest::new(code, language, options))
}

fn record_report(cfg: &CodelensConfig, report: &DashboardReport, language: Option<&str>) {
    if !cfg.logging.enabled {
        return;
    }
    let entry = logger::AnalysisLogEntry::from_report(report, language);
    logger::log_analysis(&logger::expand_home(&cfg.logging.path), &entry);
    if !report.warnings.is_empty() {
        events::log_warnings(
            &logger::expand_home(&cfg.logging.events_path),
            report.analysis_id.as_deref(),
            &report.warnings,
        );
    }
}

fn record_error(cfg: &CodelensConfig, err: &AnalysisError, language: Option<&str>) {
    if !cfg.logging.enabled {
        return;
    }
    let entry = logger::AnalysisLogEntry::from_error(err, language);
    logger::log_analysis(&logger::expand_home(&cfg.logging.path), &entry);
    events::log_error(&logger::expand_home(&cfg.logging.events_path), err);
}

fn print_error_json(err: &AnalysisError) -> Result<()> {
    let value = serde_json::json!({
        "success": false,
        "error": err.kind(),
        "message": err.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// codelens complexity | suggestions | functions
// ---------------------------------------------------------------------------

/// Parse a raw complexity block. Returns `Ok(false)` when no token was found.
pub fn run_complexity(input: Option<&Path>, display: DisplayArgs<'_>) -> Result<bool> {
    let cfg = config::load();
    let (format, theme) = resolve_display(&cfg, display)?;
    let text = read_input(input)?;

    let assessment = extract_complexity(Some(text.as_str()).filter(|t| !t.trim().is_empty()));
    match format {
        config::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        config::OutputFormat::Table => {
            let session = AnalysisSession::new(theme);
            let mut view = TerminalView::stdout(cfg.display.show_source);
            match &assessment {
                Some(a) => view.render_complexity(&session, a),
                None => view.render_placeholder(
                    &session,
                    AnalysisOption::Complexity,
                    response::placeholder(AnalysisOption::Complexity),
                ),
            }
        }
    }

    Ok(assessment.is_some())
}

/// Split a raw refactoring block into prioritized suggestions.
pub fn run_suggestions(input: Option<&Path>, display: DisplayArgs<'_>) -> Result<()> {
    let cfg = config::load();
    let (format, theme) = resolve_display(&cfg, display)?;
    let text = read_input(input)?;

    let suggestions = extract_suggestions(Some(&text));
    match format {
        config::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        config::OutputFormat::Table => {
            let session = AnalysisSession::new(theme);
            let mut view = TerminalView::stdout(false);
            view.render_suggestions(&session, &suggestions);
        }
    }

    Ok(())
}

/// Print the heuristic function count of a source file.
pub fn run_functions(input: &Path, format: Option<&str>) -> Result<()> {
    let cfg = config::load();
    let format = resolve_format(&cfg, format)?;
    let code = read_input(Some(input))?;
    let count = count_function_declarations(&code);

    match format {
        config::OutputFormat::Json => {
            let value = serde_json::json!({
                "file": input.display().to_string(),
                "function_count": count,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        config::OutputFormat::Table => {
            println!("  {} {}", "Functions:".bold(), count);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// codelens stats
// ---------------------------------------------------------------------------

/// Show a summary of the local analysis log.
pub fn run_stats(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let cfg = config::load();
    let stats = reporter::compute_stats(&logger::expand_home(&cfg.logging.path), days);

    if stats.total_analyses == 0 {
        println!(
            "{}",
            "No data yet. Interpret some responses with codelens to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_stats_json(&stats)?,
        OutputFormat::Csv => print_stats_csv(&stats),
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &Stats) {
    println!("{}", "codelens Analysis Report".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    println!(
        "  {} {}",
        "Total analyses:  ".bold(),
        format_number(stats.total_analyses)
    );
    println!("  {} {:.1}%", "Success rate:    ".bold(), stats.success_pct());
    println!(
        "  {} {:.1}/100",
        "Avg performance: ".bold(),
        stats.avg_performance_score
    );
    println!("  {} {:.1}/10", "Avg overall:     ".bold(), stats.avg_overall_score);
    println!(
        "  {} {}",
        "Suggestions:     ".bold(),
        format_number(stats.total_suggestions)
    );
    println!();

    if !stats.token_stats.is_empty() {
        println!("{}", "Time Complexity Distribution".bold().cyan());
        println!("  {:<20} {:>6} {:>12}", "Token", "Count", "Avg Perf");
        println!("  {}", "-".repeat(40));

        for (i, token) in stats.token_stats.iter().take(15).enumerate() {
            let line = format!(
                "  {:<20} {:>6} {:>12.1}",
                truncate(&token.token, 20),
                token.count,
                token.avg_performance_score,
            );
            if i % 2 == 0 {
                println!("{line}");
            } else {
                println!("{}", line.dimmed());
            }
        }
        println!();
    }

    if !stats.error_kinds.is_empty() {
        println!("{}", "Failures by Kind".bold().cyan());
        for (kind, count) in &stats.error_kinds {
            println!("  {:<20} {:>6}", kind, count);
        }
    }
}

fn print_stats_json(stats: &Stats) -> Result<()> {
    let value = serde_json::json!({
        "total_analyses": stats.total_analyses,
        "failures": stats.failures,
        "success_pct": stats.success_pct(),
        "avg_performance_score": stats.avg_performance_score,
        "avg_overall_score": stats.avg_overall_score,
        "total_suggestions": stats.total_suggestions,
        "tokens": stats.token_stats.iter().map(|t| serde_json::json!({
            "token": t.token,
            "count": t.count,
            "avg_performance_score": t.avg_performance_score,
        })).collect::<Vec<_>>(),
        "errors": stats.error_kinds.iter().map(|(kind, count)| serde_json::json!({
            "kind": kind,
            "count": count,
        })).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_stats_csv(stats: &Stats) {
    println!("token,count,avg_performance_score");
    for t in &stats.token_stats {
        println!("{},{},{:.1}", t.token, t.count, t.avg_performance_score);
    }
}

// ---------------------------------------------------------------------------
// codelens config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective codelens Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file().is_some_and(|p| p.exists());
    let project_exists = config::project_config_file().is_some_and(|p| p.exists());
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(global_exists, "~/.codelens/config.toml");
    print_source(project_exists, ".codelens.toml");
    println!(
        "  {} {}",
        "·".dimmed(),
        "CODELENS_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(exists: bool, name: &str) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.codelens/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to customize codelens.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Input and display resolution
// ---------------------------------------------------------------------------

/// Read a file, or stdin when the path is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn resolve_display(
    cfg: &CodelensConfig,
    display: DisplayArgs<'_>,
) -> Result<(config::OutputFormat, Theme)> {
    let format = resolve_format(cfg, display.format)?;
    let theme = match display.theme {
        Some(raw) => config::parse_theme(raw)
            .with_context(|| format!("unknown theme '{raw}' (expected standard or hacker)"))?,
        None => cfg.display.theme,
    };
    Ok((format, theme))
}

fn resolve_format(cfg: &CodelensConfig, format: Option<&str>) -> Result<config::OutputFormat> {
    match format {
        Some(raw) => config::parse_format(raw)
            .with_context(|| format!("unknown format '{raw}' (expected table or json)")),
        None => Ok(cfg.display.format),
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
