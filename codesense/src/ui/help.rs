//! Help overlay renderer.
//!
//! Draws a centred modal over the report. `Clear` erases the cells under the
//! modal first, inside the same `terminal.draw()` closure as the panels.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 50 columns, where the modal would have
/// no room for its text.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = centered(frame.area(), 70, 80);
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to close ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = Style::default().fg(theme.heading).add_modifier(Modifier::BOLD);
    Text::from(vec![
        Line::styled("Code comparison", heading),
        Line::from("  o / c / d     Original / Corrected / Changes tab"),
        Line::from("  Tab / S-Tab   Next / previous tab"),
        Line::from(""),
        Line::styled("Review sections", heading),
        Line::from("  1 2 3 4       Expand / collapse Structure, Implementation,"),
        Line::from("                Best Practices, Recommendations"),
        Line::from("  click header  Expand / collapse that section"),
        Line::from(""),
        Line::styled("Navigation", heading),
        Line::from("  H / L         Focus code / review panel"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  mouse wheel   Scroll the panel under focus"),
        Line::from(""),
        Line::styled("General", heading),
        Line::from("  ?             Open / close this help"),
        Line::from("  b / Backspace Back to code entry"),
        Line::from("  q / Esc       Quit"),
    ])
}
