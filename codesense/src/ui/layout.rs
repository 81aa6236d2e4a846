//! Screen layout for the report.
//!
//! Pure layout arithmetic; called inside `terminal.draw()` every frame so the
//! layout always follows the current terminal size.
//!
//! ```text
//! header        1 row
//! metrics       one 4-row band per 4 metric cards
//! comparison | findings     (stacked vertically below 110 columns)
//! status bar    1 row
//! ```

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Terminal width at which comparison and findings sit side by side.
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 110;
/// Metric cards per grid row.
pub const METRICS_PER_ROW: usize = 4;
/// Height of one metric card including borders.
pub const METRIC_CARD_HEIGHT: u16 = 4;

/// Rects for every region of one frame. Valid only inside the current draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportAreas {
    pub header: Rect,
    pub metrics: Rect,
    pub comparison: Rect,
    pub findings: Rect,
    pub status_bar: Rect,
}

/// Height of the metrics grid for `metric_count` cards.
///
/// An empty grid still gets one band so the "no metrics" box has room.
pub fn metrics_height(metric_count: usize) -> u16 {
    let rows = metric_count.div_ceil(METRICS_PER_ROW).max(1);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_mul(METRIC_CARD_HEIGHT)
}

/// Splits `area` into the report regions.
pub fn compute_layout(area: Rect, metric_count: usize) -> ReportAreas {
    let [header, metrics, main, status_bar] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(metrics_height(metric_count)),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let split = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
    } else {
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
    };
    let [comparison, findings] = split.spacing(Spacing::Overlap(1)).areas(main);

    ReportAreas { header, metrics, comparison, findings, status_bar }
}

/// The inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered block for a panel; thick border when focused.
///
/// `MergeStrategy::Fuzzy` because adjacent panels share a border column and
/// mix `Thick` with `Plain` junctions.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &Theme) -> Block<'a> {
    let (border_style, border_type) = if is_focused {
        (Style::default().fg(theme.border_active), BorderType::Thick)
    } else {
        (Style::default().fg(theme.border_inactive), BorderType::Plain)
    };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the header row: app name and the way back to the entry view.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" ◆ ", Style::default().fg(theme.brand)),
        Span::styled(
            "CodeSense",
            Style::default().fg(theme.brand).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ← Back (b)", Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the 1-row status bar: mode, focused panel, active tab, key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mode_text = match state.mode {
        Mode::Normal => " NORMAL ",
        Mode::HelpOverlay => " HELP ",
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let status_line = Line::from(vec![
        Span::styled(mode_text, bold.fg(theme.status_focus)),
        Span::raw(" "),
        Span::styled(state.focus.title(), bold),
        Span::raw(format!("  tab: {}", state.view.active_tab.title())),
        Span::styled("   ? help  b back  q quit", Style::default().fg(theme.muted)),
    ]);

    frame.render_widget(
        Paragraph::new(status_line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_band_grows_per_four_cards() {
        assert_eq!(metrics_height(0), 4);
        assert_eq!(metrics_height(1), 4);
        assert_eq!(metrics_height(4), 4);
        assert_eq!(metrics_height(5), 8);
    }

    #[test]
    fn wide_terminals_split_horizontally() {
        let areas = compute_layout(Rect::new(0, 0, 140, 40), 3);
        assert_eq!(areas.header.height, 1);
        assert_eq!(areas.metrics.height, 4);
        assert_eq!(areas.status_bar.y, 39);
        assert_eq!(areas.comparison.y, areas.findings.y);
        assert!(areas.comparison.x < areas.findings.x);
    }

    #[test]
    fn narrow_terminals_stack_panels() {
        let areas = compute_layout(Rect::new(0, 0, 80, 40), 3);
        assert_eq!(areas.comparison.x, areas.findings.x);
        assert!(areas.comparison.y < areas.findings.y);
    }
}
