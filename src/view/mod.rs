//! View adapter seam.
//!
//! The interpreter never paints anything itself. A [`DashboardView`]
//! implementation receives already-interpreted data, one section at a time,
//! together with the caller-owned [`AnalysisSession`] context.
//!
//! [`render_report`] drives a view through a full [`DashboardReport`]: every
//! section is rendered or replaced by its placeholder independently, so one
//! unreadable section never blocks the others.

pub mod terminal;

use std::collections::BTreeSet;

use crate::interpret::{ComplexityAssessment, RefactoringSuggestion, Theme};
use crate::response::{
    AnalysisError, AnalysisOption, DashboardReport, DisplayScores, SectionOutcome,
};

pub use terminal::TerminalView;

// ---------------------------------------------------------------------------
// Session context
// ---------------------------------------------------------------------------

/// Per-analysis state owned by the caller and passed into the view.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    pub theme: Theme,
    analysis_id: Option<String>,
    completed: BTreeSet<AnalysisOption>,
}

impl AnalysisSession {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Start a new analysis cycle. Clears sections completed by the
    /// previous one.
    pub fn begin(&mut self, analysis_id: Option<String>) {
        self.analysis_id = analysis_id;
        self.completed.clear();
    }

    pub fn analysis_id(&self) -> Option<&str> {
        self.analysis_id.as_deref()
    }

    pub fn mark_completed(&mut self, section: AnalysisOption) {
        self.completed.insert(section);
    }

    pub fn is_completed(&self, section: AnalysisOption) -> bool {
        self.completed.contains(&section)
    }

    /// Completed sections in tab order.
    pub fn completed(&self) -> impl Iterator<Item = AnalysisOption> + '_ {
        self.completed.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// View trait
// ---------------------------------------------------------------------------

/// A rendering target for interpreted analysis results.
pub trait DashboardView {
    fn render_scores(&mut self, session: &AnalysisSession, scores: &DisplayScores);

    fn render_complexity(&mut self, session: &AnalysisSession, assessment: &ComplexityAssessment);

    fn render_suggestions(
        &mut self,
        session: &AnalysisSession,
        suggestions: &[RefactoringSuggestion],
    );

    /// Free-text sections: documentation and improvements.
    fn render_text_section(
        &mut self,
        session: &AnalysisSession,
        section: AnalysisOption,
        text: &str,
    );

    fn render_structure(&mut self, session: &AnalysisSession, image: &str);

    fn render_placeholder(
        &mut self,
        session: &AnalysisSession,
        section: AnalysisOption,
        message: &str,
    );

    fn notify_error(&mut self, session: &AnalysisSession, error: &AnalysisError);

    /// Tolerated problems. Views may ignore them.
    fn notify_warnings(&mut self, _session: &AnalysisSession, _warnings: &[String]) {}
}

/// Render a full report. Resets the session for the report's analysis id and
/// marks each section that rendered real content as completed.
pub fn render_report<V: DashboardView + ?Sized>(
    view: &mut V,
    session: &mut AnalysisSession,
    report: &DashboardReport,
) {
    session.begin(report.analysis_id.clone());

    view.render_scores(session, &report.scores);

    render_section(view, session, AnalysisOption::Complexity, &report.complexity, |v, s, a| {
        v.render_complexity(s, a)
    });
    render_section(view, session, AnalysisOption::Documentation, &report.documentation, |v, s, t| {
        v.render_text_section(s, AnalysisOption::Documentation, t)
    });
    render_section(view, session, AnalysisOption::Refactoring, &report.refactoring, |v, s, list| {
        v.render_suggestions(s, list)
    });
    render_section(view, session, AnalysisOption::Structure, &report.structure, |v, s, img| {
        v.render_structure(s, img)
    });
    render_section(view, session, AnalysisOption::Improvements, &report.improvements, |v, s, t| {
        v.render_text_section(s, AnalysisOption::Improvements, t)
    });

    if !report.warnings.is_empty() {
        view.notify_warnings(session, &report.warnings);
    }
}

/// Surface a cycle-level error. Sessions keep whatever was rendered before.
pub fn render_error<V: DashboardView + ?Sized>(
    view: &mut V,
    session: &AnalysisSession,
    error: &AnalysisError,
) {
    view.notify_error(session, error);
}

fn render_section<V, T>(
    view: &mut V,
    session: &mut AnalysisSession,
    section: AnalysisOption,
    outcome: &SectionOutcome<T>,
    render: impl FnOnce(&mut V, &AnalysisSession, &T),
) where
    V: DashboardView + ?Sized,
{
    match outcome {
        SectionOutcome::Ready(value) => {
            render(view, &*session, value);
            session.mark_completed(section);
        }
        SectionOutcome::Unavailable(message) => view.render_placeholder(session, section, message),
        SectionOutcome::Skipped => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::interpret_response;

    /// Records calls instead of drawing.
    #[derive(Default)]
    struct RecordingView {
        calls: Vec<String>,
    }

    impl DashboardView for RecordingView {
        fn render_scores(&mut self, _: &AnalysisSession, scores: &DisplayScores) {
            self.calls.push(format!("scores:{}", scores.performance));
        }
        fn render_complexity(&mut self, _: &AnalysisSession, a: &ComplexityAssessment) {
            self.calls.push(format!("complexity:{}", a.time_token));
        }
        fn render_suggestions(&mut self, _: &AnalysisSession, list: &[RefactoringSuggestion]) {
            self.calls.push(format!("suggestions:{}", list.len()));
        }
        fn render_text_section(&mut self, _: &AnalysisSession, section: AnalysisOption, _: &str) {
            self.calls.push(format!("text:{section}"));
        }
        fn render_structure(&mut self, _: &AnalysisSession, _: &str) {
            self.calls.push("structure".to_string());
        }
        fn render_placeholder(&mut self, _: &AnalysisSession, section: AnalysisOption, _: &str) {
            self.calls.push(format!("placeholder:{section}"));
        }
        fn notify_error(&mut self, _: &AnalysisSession, error: &AnalysisError) {
            self.calls.push(format!("error:{}", error.kind()));
        }
    }

    #[test]
    fn renders_every_section_in_tab_order() {
        let body = r#"{"results": {
            "analysis_id": "abc",
            "complexity_analysis": "Time Complexity: O(log n)",
            "documentation": "Docs",
            "refactoring_suggestions": "1. a\n2. b",
            "improvement_suggestions": "Improve"
        }}"#;
        let report = interpret_response(body, None).unwrap();
        let mut view = RecordingView::default();
        let mut session = AnalysisSession::new(Theme::Standard);

        render_report(&mut view, &mut session, &report);

        assert_eq!(
            view.calls,
            vec![
                "scores:85",
                "complexity:O(log n)",
                "text:documentation",
                "suggestions:2",
                "placeholder:structure",
                "text:improvements",
            ]
        );
        assert_eq!(session.analysis_id(), Some("abc"));
        assert!(session.is_completed(AnalysisOption::Complexity));
        assert!(!session.is_completed(AnalysisOption::Structure));
    }

    #[test]
    fn new_report_resets_completed_sections() {
        let mut session = AnalysisSession::new(Theme::Hacker);
        let mut view = RecordingView::default();

        let first = interpret_response(
            r#"{"results": {"analysis_id": "1", "documentation": "d"}}"#,
            None,
        )
        .unwrap();
        render_report(&mut view, &mut session, &first);
        assert!(session.is_completed(AnalysisOption::Documentation));

        let second = interpret_response(r#"{"results": {"analysis_id": "2"}}"#, None).unwrap();
        render_report(&mut view, &mut session, &second);
        assert_eq!(session.analysis_id(), Some("2"));
        assert_eq!(session.completed().count(), 0);
    }

    #[test]
    fn errors_go_through_the_view() {
        let session = AnalysisSession::default();
        let mut view = RecordingView::default();
        render_error(&mut view, &session, &AnalysisError::NoOptionsSelected);
        assert_eq!(view.calls, vec!["error:no_options"]);
    }
}
