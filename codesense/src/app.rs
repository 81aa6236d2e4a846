//! Interactive state of the mounted report.
//!
//! `AppState` wraps the core [`ViewState`] (active comparison tab, expanded
//! sections) with what only a terminal needs: panel focus, scroll offsets,
//! geometry cached from the last frame, and the syntax-highlighted source for
//! the two code tabs. No ratatui rendering happens here; the render module
//! reads this state and the keybinding dispatcher mutates it.

use codesense_core::view_state::{ComparisonTab, Section, ViewState};
use codesense_core::ReviewSession;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::highlight;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Help overlay is drawn above the report.
    HelpOverlay,
}

/// Which panel receives scroll keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Code comparison (tabs + code or change cards).
    #[default]
    Comparison,
    /// Finding categories and recommendations.
    Findings,
}

impl PanelFocus {
    pub fn title(self) -> &'static str {
        match self {
            PanelFocus::Comparison => "CODE",
            PanelFocus::Findings => "REVIEW",
        }
    }
}

/// Pre-highlighted lines for the two source tabs, computed once at mount.
#[derive(Debug, Default)]
pub struct HighlightedSource {
    pub original: Vec<Line<'static>>,
    /// Empty unless the review carries corrections.
    pub corrected: Vec<Line<'static>>,
}

pub struct AppState {
    /// Tab and section state shared with the report projection.
    pub view: ViewState,
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Vertical scroll offset of the comparison body.
    pub comparison_scroll: u16,
    /// Vertical scroll offset of the findings panel.
    pub findings_scroll: u16,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,

    /// Inner heights and content lengths cached after each render, used by
    /// page-wise scrolling and to keep offsets inside the content.
    pub comparison_viewport_height: u16,
    pub findings_viewport_height: u16,
    pub comparison_content_height: usize,
    pub findings_content_height: usize,

    /// Outer rects of the comparison and findings panels from the last frame.
    pub panel_rects: [Rect; 2],
    /// Line index of each section header inside the findings content.
    pub section_rows: Vec<(usize, Section)>,

    pub source: HighlightedSource,
}

impl AppState {
    /// Builds the state for a freshly mounted session.
    ///
    /// `syntax` is a file extension used to pick the highlighting grammar.
    pub fn new(session: &ReviewSession, syntax: &str) -> Self {
        let corrected = session
            .result
            .available_corrections()
            .map(|c| highlight::highlight_source(&c.corrected_code, syntax))
            .unwrap_or_default();
        Self {
            view: ViewState::default(),
            mode: Mode::default(),
            focus: PanelFocus::default(),
            comparison_scroll: 0,
            findings_scroll: 0,
            help_scroll: 0,
            comparison_viewport_height: 0,
            findings_viewport_height: 0,
            comparison_content_height: 0,
            findings_content_height: 0,
            panel_rects: [Rect::default(); 2],
            section_rows: Vec::new(),
            source: HighlightedSource {
                original: highlight::highlight_source(&session.original_code, syntax),
                corrected,
            },
        }
    }

    /// Highlighted lines for a source tab; empty for `Changes`.
    pub fn source_lines(&self, tab: ComparisonTab) -> &[Line<'static>] {
        match tab {
            ComparisonTab::Original => &self.source.original,
            ComparisonTab::Corrected => &self.source.corrected,
            ComparisonTab::Changes => &[],
        }
    }

    /// Selects a comparison tab. Switching to a different tab scrolls the
    /// comparison body back to the top.
    pub fn select_tab(&mut self, tab: ComparisonTab) {
        if self.view.active_tab != tab {
            self.comparison_scroll = 0;
        }
        self.view.select_tab(tab);
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.view.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(self.view.active_tab.prev());
    }

    pub fn toggle_section(&mut self, section: Section) {
        self.view.toggle_section(section);
    }

    /// Toggles the section whose header sits at findings line `line`.
    ///
    /// Returns `false` when `line` is not a header.
    pub fn toggle_section_at_line(&mut self, line: usize) -> bool {
        let hit = self
            .section_rows
            .iter()
            .find(|(row, _)| *row == line)
            .map(|(_, section)| *section);
        match hit {
            Some(section) => {
                self.toggle_section(section);
                true
            }
            None => false,
        }
    }

    fn focused_scroll(&mut self) -> &mut u16 {
        match self.focus {
            PanelFocus::Comparison => &mut self.comparison_scroll,
            PanelFocus::Findings => &mut self.findings_scroll,
        }
    }

    fn focused_viewport(&self) -> u16 {
        match self.focus {
            PanelFocus::Comparison => self.comparison_viewport_height,
            PanelFocus::Findings => self.findings_viewport_height,
        }
    }

    /// Largest useful scroll offset for the focused panel: the last page.
    fn focused_max_scroll(&self) -> u16 {
        let (content, viewport) = match self.focus {
            PanelFocus::Comparison => {
                (self.comparison_content_height, self.comparison_viewport_height)
            }
            PanelFocus::Findings => (self.findings_content_height, self.findings_viewport_height),
        };
        let max = content.saturating_sub(usize::from(viewport));
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let scroll = self.focused_scroll();
        *scroll = scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let scroll = self.focused_scroll();
        *scroll = scroll.saturating_sub(lines);
    }

    pub fn scroll_top(&mut self) {
        *self.focused_scroll() = 0;
    }

    pub fn scroll_bottom(&mut self) {
        let max = self.focused_max_scroll();
        *self.focused_scroll() = max;
    }

    /// Scrolls by half the visible height (at least one line).
    pub fn half_page_down(&mut self) {
        let half = self.focused_viewport() / 2;
        self.scroll_down(half.max(1));
    }

    pub fn half_page_up(&mut self) {
        let half = self.focused_viewport() / 2;
        self.scroll_up(half.max(1));
    }

    /// Scrolls by the full visible height (at least one line).
    pub fn full_page_down(&mut self) {
        let full = self.focused_viewport();
        self.scroll_down(full.max(1));
    }

    pub fn full_page_up(&mut self) {
        let full = self.focused_viewport();
        self.scroll_up(full.max(1));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use codesense_core::store::{self, MemoryStore, ORIGINAL_CODE_KEY, REVIEW_RESULT_KEY};

    pub(crate) const PAYLOAD: &str = r#"{
        "metrics": {"Quality": 85, "Security": 55},
        "structureAnalysis": {"score": 90, "findings": [
            {"aspect": "Layout", "explanation": "Modules are well split", "severity": "info"}
        ]},
        "implementationReview": {"score": 72, "findings": [
            {"issue": "Unused import", "explanation": "Remove it", "severity": "warning"}
        ]},
        "bestPractices": {"score": 41, "findings": [
            {"aspect": "Naming", "explanation": "Use snake_case",
             "recommendation": "Rename fooBar", "severity": "error"}
        ]},
        "recommendations": [{"title": "Add tests", "description": "Cover the parser"}],
        "corrections": {
            "hasCorrections": true,
            "correctedCode": "def f(): pass",
            "changes": [{"type": "rename", "location": "line 3", "original": "x",
                         "correction": "y", "explanation": "clarity"}]
        }
    }"#;

    pub(crate) fn session_from(payload: &str) -> ReviewSession {
        let store = MemoryStore::new()
            .with(REVIEW_RESULT_KEY, payload)
            .with(ORIGINAL_CODE_KEY, "def f(x):\n    return x\n");
        store::load(&store).unwrap()
    }

    #[test]
    fn switching_tabs_resets_comparison_scroll() {
        let mut state = AppState::new(&session_from(PAYLOAD), "py");
        state.comparison_scroll = 7;
        state.select_tab(ComparisonTab::Original);
        assert_eq!(state.comparison_scroll, 7, "re-selecting the active tab keeps scroll");
        state.select_tab(ComparisonTab::Changes);
        assert_eq!(state.comparison_scroll, 0);
        assert_eq!(state.view.active_tab, ComparisonTab::Changes);
    }

    #[test]
    fn scrolling_follows_focus() {
        let mut state = AppState::new(&session_from(PAYLOAD), "py");
        state.scroll_down(3);
        assert_eq!(state.comparison_scroll, 3);
        assert_eq!(state.findings_scroll, 0);

        state.focus = PanelFocus::Findings;
        state.findings_viewport_height = 10;
        state.half_page_down();
        assert_eq!(state.findings_scroll, 5);
        state.full_page_up();
        assert_eq!(state.findings_scroll, 0);
    }

    #[test]
    fn scroll_bottom_lands_on_last_page() {
        let mut state = AppState::new(&session_from(PAYLOAD), "py");
        state.focus = PanelFocus::Findings;
        state.findings_content_height = 40;
        state.findings_viewport_height = 15;
        state.scroll_bottom();
        assert_eq!(state.findings_scroll, 25);
        state.scroll_top();
        assert_eq!(state.findings_scroll, 0);
    }

    #[test]
    fn clicking_a_header_row_toggles_its_section() {
        let mut state = AppState::new(&session_from(PAYLOAD), "py");
        state.section_rows = vec![(0, Section::Structure), (4, Section::Implementation)];
        assert!(state.toggle_section_at_line(4));
        assert!(!state.view.is_expanded(Section::Implementation));
        assert!(!state.toggle_section_at_line(2));
        assert!(state.view.is_expanded(Section::Structure));
    }

    #[test]
    fn corrected_source_is_highlighted_only_with_corrections() {
        let state = AppState::new(&session_from(PAYLOAD), "py");
        assert_eq!(state.source_lines(ComparisonTab::Corrected).len(), 1);
        assert_eq!(state.source_lines(ComparisonTab::Original).len(), 2);
        assert!(state.source_lines(ComparisonTab::Changes).is_empty());

        let without = PAYLOAD.replace("\"hasCorrections\": true", "\"hasCorrections\": false");
        let state = AppState::new(&session_from(&without), "py");
        assert!(state.source_lines(ComparisonTab::Corrected).is_empty());
    }
}
