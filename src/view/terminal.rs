//! Colored terminal rendering of an analysis dashboard.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::interpret::{ColorTier, ComplexityAssessment, Priority, RefactoringSuggestion, Theme};
use crate::response::{AnalysisError, AnalysisOption, DisplayScores};

use super::{AnalysisSession, DashboardView};

/// Width of the percentage bars on the overview.
const BAR_WIDTH: usize = 20;

/// Maximum characters of a structure data URI echoed to the terminal.
const STRUCTURE_PREVIEW_CHARS: usize = 60;

/// Writes a plain-text dashboard. Write failures are ignored: a broken pipe
/// on stdout must not turn into an analysis error.
pub struct TerminalView<W: Write> {
    out: W,
    show_source: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(show_source: bool) -> Self {
        Self::new(io::stdout(), show_source)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, show_source: bool) -> Self {
        Self { out, show_source }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, session: &AnalysisSession, title: &str) {
        let title = match session.theme {
            Theme::Standard => title.to_string(),
            Theme::Hacker => format!("> {}", title.to_uppercase()),
        };
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{}", accent(session.theme, &title).bold());
        let _ = writeln!(self.out, "{}", "=".repeat(50));
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn render_scores(&mut self, session: &AnalysisSession, scores: &DisplayScores) {
        let title = match session.analysis_id() {
            Some(id) => format!("Code Analysis Overview ({id})"),
            None => "Code Analysis Overview".to_string(),
        };
        self.heading(session, &title);

        for (label, value) in [
            ("Performance", scores.performance),
            ("Readability", scores.readability),
            ("Documentation", scores.documentation),
            ("Testing", scores.testing),
        ] {
            let _ = writeln!(
                self.out,
                "  {:<14} {} {:>3}%",
                label,
                percentage_bar(value),
                value
            );
        }
    }

    fn render_complexity(&mut self, session: &AnalysisSession, a: &ComplexityAssessment) {
        let theme = session.theme;
        self.heading(session, "Complexity");

        let _ = writeln!(
            self.out,
            "  {} {} ({})",
            "Time: ".bold(),
            paint(a.time_color, theme, a.time_token.as_str()),
            a.time_level(theme),
        );
        let _ = writeln!(
            self.out,
            "  {} {} ({})",
            "Space:".bold(),
            paint(a.space_color, theme, a.space_token.as_str()),
            a.space_level(theme),
        );
        let _ = writeln!(
            self.out,
            "  {} {}/100   {} {}/10",
            "Performance:".bold(),
            a.performance_score,
            "Overall:".bold(),
            a.overall_score,
        );

        if self.show_source {
            let _ = writeln!(self.out);
            for line in a.source_text.lines() {
                let _ = writeln!(self.out, "  {}", line.dimmed());
            }
        }
    }

    fn render_suggestions(
        &mut self,
        session: &AnalysisSession,
        suggestions: &[RefactoringSuggestion],
    ) {
        self.heading(session, "Refactoring");

        if suggestions.is_empty() {
            let _ = writeln!(self.out, "  {}", "No refactoring suggestions".green());
            return;
        }

        for s in suggestions {
            let priority = match s.priority {
                Priority::High => "HIGH".red().bold(),
                Priority::Medium => "MEDIUM".yellow(),
            };
            let _ = writeln!(
                self.out,
                "  {:>2}. [{}] {} {}",
                s.index + 1,
                priority,
                s.description,
                format!("({})", s.category).dimmed(),
            );
        }
    }

    fn render_text_section(
        &mut self,
        session: &AnalysisSession,
        section: AnalysisOption,
        text: &str,
    ) {
        self.heading(session, section_title(section));
        for line in text.lines() {
            let _ = writeln!(self.out, "  {line}");
        }
    }

    fn render_structure(&mut self, session: &AnalysisSession, image: &str) {
        self.heading(session, section_title(AnalysisOption::Structure));
        let preview: String = image.chars().take(STRUCTURE_PREVIEW_CHARS).collect();
        let _ = writeln!(
            self.out,
            "  {} {}{}",
            "Diagram:".bold(),
            preview,
            if image.chars().count() > STRUCTURE_PREVIEW_CHARS { "…" } else { "" },
        );
    }

    fn render_placeholder(
        &mut self,
        session: &AnalysisSession,
        section: AnalysisOption,
        message: &str,
    ) {
        self.heading(session, section_title(section));
        let _ = writeln!(self.out, "  {}", message.yellow());
    }

    fn notify_error(&mut self, _session: &AnalysisSession, error: &AnalysisError) {
        let _ = writeln!(self.out, "{} {}", "✗".red().bold(), error.to_string().red());
    }

    fn notify_warnings(&mut self, _session: &AnalysisSession, warnings: &[String]) {
        let _ = writeln!(self.out);
        for warning in warnings {
            let _ = writeln!(self.out, "  {} {}", "!".yellow(), warning.dimmed());
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn section_title(section: AnalysisOption) -> &'static str {
    match section {
        AnalysisOption::Complexity => "Complexity",
        AnalysisOption::Documentation => "Documentation",
        AnalysisOption::Refactoring => "Refactoring",
        AnalysisOption::Structure => "Structure",
        AnalysisOption::Improvements => "Improvements",
    }
}

fn accent(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Standard => text.cyan(),
        Theme::Hacker => text.bright_green(),
    }
}

/// Paint text with a tier's themed hex color.
fn paint(tier: ColorTier, theme: Theme, text: &str) -> ColoredString {
    let (r, g, b) = hex_to_rgb(tier.hex(theme));
    text.truecolor(r, g, b)
}

/// Parse `#RRGGBB`. Malformed input paints white.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(255)
    };
    (channel(0), channel(2), channel(4))
}

fn percentage_bar(value: u8) -> String {
    let filled = usize::from(value.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
