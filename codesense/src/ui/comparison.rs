//! Code comparison panel: a tab strip over either source code or change cards.
//!
//! The body is pre-laid-out into one `Line` per screen row and scrolled with
//! `Paragraph::scroll`. Lines wider than the body (or a change-card column)
//! are split into width-sized rows here, so the scroll offset maps one-to-one
//! onto content rows and no code is cut off.

use codesense_core::report::{ChangeCard, ComparisonBody, ComparisonPanel, NO_CORRECTIONS};
use codesense_core::view_state::ComparisonTab;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};
use crate::ui::text::{chunk, fit, labeled_lines, wrap_line};

const COLUMN_DIVIDER: &str = " │ ";
/// Display width of [`COLUMN_DIVIDER`]; its byte length is larger.
const DIVIDER_WIDTH: usize = 3;

/// Renders the comparison panel and records its geometry in `state`.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `area`: the `Rect` for the panel (includes borders)
/// * `panel`: projected comparison panel for this frame
/// * `state`: app state; viewport and content heights are written back and
///   `comparison_scroll` is clamped to the last page
/// * `theme`: active color theme
pub fn render_comparison(
    frame: &mut Frame,
    area: Rect,
    panel: &ComparisonPanel<'_>,
    state: &mut AppState,
    theme: &Theme,
) {
    let block = panel_block(" Code Comparison ", state.focus == PanelFocus::Comparison, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let [tab_row, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    let tabs = Tabs::new(ComparisonTab::ALL.map(ComparisonTab::title))
        .select(panel.active_tab.index())
        .style(Style::default().fg(theme.tab_inactive))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(COLUMN_DIVIDER.trim());
    frame.render_widget(tabs, tab_row);

    let lines = comparison_lines(panel, state, usize::from(body.width), theme);

    state.comparison_viewport_height = body.height;
    state.comparison_content_height = lines.len();
    let max_scroll = lines.len().saturating_sub(usize::from(body.height));
    state.comparison_scroll = state
        .comparison_scroll
        .min(u16::try_from(max_scroll).unwrap_or(u16::MAX));

    frame.render_widget(Paragraph::new(lines).scroll((state.comparison_scroll, 0)), body);
}

/// Lays the comparison body out as screen rows for a body `width` cells wide.
pub fn comparison_lines(
    panel: &ComparisonPanel<'_>,
    state: &AppState,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    match &panel.body {
        ComparisonBody::Empty => vec![
            Line::default(),
            Line::styled(format!("⊘ {NO_CORRECTIONS}"), Style::default().fg(theme.muted))
                .centered(),
        ],
        ComparisonBody::Source(_) => state
            .source_lines(panel.active_tab)
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect(),
        ComparisonBody::Changes(cards) if cards.is_empty() => vec![Line::styled(
            "No itemised changes",
            Style::default().fg(theme.muted),
        )],
        ComparisonBody::Changes(cards) => cards
            .iter()
            .flat_map(|card| change_lines(card, width, theme))
            .collect(),
    }
}

/// One change card: heading, side-by-side snippets, explanation, spacer.
fn change_lines(card: &ChangeCard<'_>, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut heading = vec![
        Span::styled("⇄ ", Style::default().fg(theme.label)),
        Span::styled(
            card.kind.to_owned(),
            Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
        ),
    ];
    if !card.location.is_empty() {
        heading.push(Span::styled(
            format!(" ({})", card.location),
            Style::default().fg(theme.muted),
        ));
    }

    let column = width.saturating_sub(DIVIDER_WIDTH) / 2;
    let divider = Span::styled(COLUMN_DIVIDER, Style::default().fg(theme.muted));
    let mut lines = vec![
        Line::from(heading),
        Line::from(vec![
            Span::styled(fit("Original:", column), Style::default().fg(theme.change_original)),
            divider.clone(),
            Span::styled(fit("Correction:", column), Style::default().fg(theme.change_correction)),
        ]),
    ];

    let original = snippet_rows(card.original, column);
    let correction = snippet_rows(card.correction, column);
    for i in 0..original.len().max(correction.len()) {
        let left = original.get(i).map_or("", String::as_str);
        let right = correction.get(i).map_or("", String::as_str);
        lines.push(Line::from(vec![
            Span::styled(fit(left, column), Style::default().fg(theme.text)),
            divider.clone(),
            Span::styled(fit(right, column), Style::default().fg(theme.text)),
        ]));
    }

    if !card.explanation.is_empty() {
        lines.extend(labeled_lines(
            "Explanation:",
            card.explanation,
            0,
            width,
            Style::default().fg(theme.label),
            Style::default().fg(theme.text),
        ));
    }
    lines.push(Line::default());
    lines
}

/// Splits a snippet into rows at most `column` cells wide, line by line.
fn snippet_rows(snippet: &str, column: usize) -> Vec<String> {
    snippet
        .lines()
        .flat_map(|line| chunk(&line.replace('\t', "    "), column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ChangeCard<'static> {
        ChangeCard {
            kind: "rename",
            location: "line 3",
            original: "x = 1\ny = 2",
            correction: "count = 1",
            explanation: "clarity",
        }
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn change_card_layout() {
        let rows = text(&change_lines(&card(), 43, &Theme::dark()));
        assert_eq!(rows[0], "⇄ rename (line 3)");
        assert_eq!(rows[1], format!("{} │ {}", fit("Original:", 20), fit("Correction:", 20)));
        assert_eq!(rows[2], format!("{} │ {}", fit("x = 1", 20), fit("count = 1", 20)));
        assert_eq!(rows[3], format!("{} │ {}", fit("y = 2", 20), fit("", 20)));
        assert_eq!(rows[4], "Explanation: clarity");
        assert_eq!(rows[5], "");
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn empty_location_and_explanation_are_omitted() {
        let bare = ChangeCard { location: "", explanation: "", ..card() };
        let rows = text(&change_lines(&bare, 43, &Theme::dark()));
        assert_eq!(rows[0], "⇄ rename");
        assert!(!rows.iter().any(|r| r.starts_with("Explanation:")));
    }

    #[test]
    fn snippet_wider_than_column_wraps_onto_more_rows() {
        let long = "let configuration = load_configuration_from(path)?; // 58c";
        assert_eq!(long.len(), 58);
        let wide = ChangeCard { original: long, correction: "ok", ..card() };
        let rows = change_lines(&wide, 60, &Theme::dark());
        // Column is (60 - 3) / 2 = 28 cells, so 58 chars need three rows.
        let left: String = rows[2..5]
            .iter()
            .map(|l| l.spans[0].content.as_ref())
            .collect::<String>();
        assert_eq!(left.trim_end(), long);
        assert_eq!(rows[2].spans[2].content.trim_end(), "ok");
        assert_eq!(rows[3].spans[2].content.trim_end(), "");
        assert!(rows.iter().all(|l| l.width() <= 60));
    }

    #[test]
    fn long_source_lines_wrap_to_body_width() {
        use crate::app::tests::{session_from, PAYLOAD};
        use codesense_core::report;

        let session = session_from(PAYLOAD);
        let mut state = AppState::new(&session, "py");
        state.select_tab(ComparisonTab::Original);
        state.source.original = vec![Line::raw("abcdefghij"), Line::default()];
        let panel = report::build(&session, &state.view).comparison;
        let rows = text(&comparison_lines(&panel, &state, 4, &Theme::dark()));
        assert_eq!(rows, ["abcd", "efgh", "ij", ""]);
    }
}
