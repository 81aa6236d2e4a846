//! UI rendering for the review report.
//!
//! [`render`] is the single entry point called from the event loop's
//! `terminal.draw()` closure. It projects the session through
//! [`codesense_core::report::build`] once per frame and hands the resulting
//! tree to the panel renderers.
//!
//! Layout arithmetic lives in `layout.rs`; each panel has its own module.

mod layout;
mod text;
pub mod comparison;
pub mod findings;
pub mod help;
pub mod keybindings;
pub mod metrics;

use codesense_core::{report, ReviewSession};
use ratatui::{style::Style, widgets::Block, Frame};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_header, render_status_bar};

/// Renders one complete frame.
///
/// Panel rects, viewport heights and header rows are written back into
/// `state` so the next key or mouse event acts on what is on screen.
pub fn render(frame: &mut Frame, session: &ReviewSession, state: &mut AppState, theme: &Theme) {
    let tree = report::build(session, &state.view);
    let areas = compute_layout(frame.area(), tree.metrics.len());
    state.panel_rects = [areas.comparison, areas.findings];

    frame.render_widget(
        Block::new().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    render_header(frame, areas.header, theme);
    metrics::render_metrics(frame, areas.metrics, &tree.metrics, theme);
    comparison::render_comparison(frame, areas.comparison, &tree.comparison, state, theme);
    findings::render_findings(frame, areas.findings, &tree, state, theme);
    render_status_bar(frame, areas.status_bar, state, theme);

    // Drawn last so it sits above every panel.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{session_from, PAYLOAD};
    use codesense_core::report::NO_CORRECTIONS;
    use codesense_core::view_state::{ComparisonTab, Section};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(session: &ReviewSession, state: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::dark();
        terminal.draw(|f| render(f, session, state, &theme)).unwrap();
        screen(terminal.backend().buffer())
    }

    fn screen(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn full_report_renders_every_region() {
        let session = session_from(PAYLOAD);
        let mut state = AppState::new(&session, "py");
        let screen = draw(&session, &mut state, 140, 40);

        assert!(screen.contains("CodeSense"));
        assert!(screen.contains("QUALITY"));
        assert!(screen.contains("85 /100"));
        assert!(screen.contains("SECURITY"));
        assert!(screen.contains("Original"));
        assert!(screen.contains("Changes"));
        assert!(screen.contains("def f(x):"));
        assert!(screen.contains("Structure Analysis"));
        assert!(screen.contains("90/100"));
        assert!(screen.contains("Unused import"));
        assert!(screen.contains("Recommendations"));
        assert!(screen.contains("NORMAL"));
        assert_eq!(state.section_rows.len(), Section::ALL.len());
        assert!(state.panel_rects[0].x < state.panel_rects[1].x);
    }

    #[test]
    fn changes_tab_lists_change_cards() {
        let session = session_from(PAYLOAD);
        let mut state = AppState::new(&session, "py");
        state.select_tab(ComparisonTab::Changes);
        let screen = draw(&session, &mut state, 140, 40);
        assert!(screen.contains("rename"));
        assert!(screen.contains("(line 3)"));
        assert!(screen.contains("Explanation: clarity"));
    }

    #[test]
    fn gated_off_corrections_show_placeholder_on_every_tab() {
        let payload = PAYLOAD.replace("\"hasCorrections\": true", "\"hasCorrections\": false");
        let session = session_from(&payload);
        let mut state = AppState::new(&session, "py");
        for tab in ComparisonTab::ALL {
            state.select_tab(tab);
            let screen = draw(&session, &mut state, 140, 40);
            assert!(screen.contains(NO_CORRECTIONS), "{tab:?}");
            assert!(!screen.contains("rename"), "{tab:?}");
        }
    }

    #[test]
    fn narrow_terminal_stacks_panels() {
        let session = session_from(PAYLOAD);
        let mut state = AppState::new(&session, "py");
        draw(&session, &mut state, 80, 50);
        assert!(state.panel_rects[0].y < state.panel_rects[1].y);
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let session = session_from(PAYLOAD);
        let mut state = AppState::new(&session, "py");
        state.mode = Mode::HelpOverlay;
        let screen = draw(&session, &mut state, 140, 40);
        assert!(screen.contains("Help: j/k scroll"));
        assert!(screen.contains("HELP"));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let session = session_from(PAYLOAD);
        let mut state = AppState::new(&session, "py");
        state.comparison_scroll = 500;
        state.findings_scroll = 500;
        draw(&session, &mut state, 140, 40);
        assert_eq!(state.comparison_scroll, 0, "two source lines fit the panel");
        assert_eq!(state.findings_scroll, 0);
    }
}
