//! Findings panel: the three scored categories followed by recommendations.
//!
//! Each section starts with a clickable header row. The row index of every
//! header is returned alongside the lines so mouse clicks can be mapped back
//! to the section they toggle.

use codesense_core::model::Severity;
use codesense_core::report::{score_label, CategoryPanel, RecommendationsPanel, ReportTree};
use codesense_core::view_state::Section;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};
use crate::ui::text::{indented_lines, labeled_lines};

const BODY_INDENT: usize = 4;

/// Renders the findings panel and records header rows and geometry in `state`.
pub fn render_findings(
    frame: &mut Frame,
    area: Rect,
    tree: &ReportTree<'_>,
    state: &mut AppState,
    theme: &Theme,
) {
    let block = panel_block(" Review ", state.focus == PanelFocus::Findings, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let (lines, section_rows) = findings_lines(tree, usize::from(inner.width), theme);

    state.section_rows = section_rows;
    state.findings_viewport_height = inner.height;
    state.findings_content_height = lines.len();
    let max_scroll = lines.len().saturating_sub(usize::from(inner.height));
    state.findings_scroll = state
        .findings_scroll
        .min(u16::try_from(max_scroll).unwrap_or(u16::MAX));

    frame.render_widget(Paragraph::new(lines).scroll((state.findings_scroll, 0)), inner);
}

/// Lays out every section for a panel `width` cells wide.
///
/// Returns the lines and, for each section, the index of its header line.
pub fn findings_lines(
    tree: &ReportTree<'_>,
    width: usize,
    theme: &Theme,
) -> (Vec<Line<'static>>, Vec<(usize, Section)>) {
    let mut lines = Vec::new();
    let mut section_rows = Vec::with_capacity(Section::ALL.len());

    for panel in &tree.categories {
        section_rows.push((lines.len(), panel.section()));
        category_lines(&mut lines, panel, width, theme);
        lines.push(Line::default());
    }

    section_rows.push((lines.len(), Section::Recommendations));
    recommendation_lines(&mut lines, &tree.recommendations, width, theme);

    (lines, section_rows)
}

/// The 1-based number shown in a header; also the key that toggles it.
fn section_number(section: Section) -> usize {
    Section::ALL.iter().position(|s| *s == section).map_or(0, |i| i + 1)
}

fn header_spans(section: Section, expanded: bool, title: &str, theme: &Theme) -> Vec<Span<'static>> {
    let chevron = if expanded { "▾ " } else { "▸ " };
    vec![
        Span::styled(chevron, Style::default().fg(theme.muted)),
        Span::styled(format!("[{}] ", section_number(section)), Style::default().fg(theme.muted)),
        Span::styled(
            title.to_owned(),
            Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
        ),
    ]
}

/// Severity glyph. Exhaustive so a new severity cannot go undrawn.
fn severity_glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "▲",
        Severity::Warning => "●",
        Severity::Info => "✓",
    }
}

fn category_lines(
    lines: &mut Vec<Line<'static>>,
    panel: &CategoryPanel<'_>,
    width: usize,
    theme: &Theme,
) {
    let mut header = header_spans(panel.section(), panel.expanded, panel.title, theme);
    header.push(Span::raw("  "));
    header.push(Span::styled(
        format!(" {} ", score_label(panel.score)),
        Style::default()
            .fg(theme.tier_fg(panel.tier))
            .bg(theme.tier_bg(panel.tier))
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(header));

    let Some(findings) = &panel.findings else {
        return;
    };
    if findings.is_empty() {
        lines.push(Line::styled("    No findings", Style::default().fg(theme.muted)));
        return;
    }
    for finding in findings {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                severity_glyph(finding.severity),
                Style::default().fg(theme.severity(finding.severity)),
            ),
            Span::raw(" "),
            Span::styled(
                finding.title.to_owned(),
                Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.extend(indented_lines(
            finding.explanation,
            BODY_INDENT,
            width,
            Style::default().fg(theme.text),
        ));
        if let Some(recommendation) = finding.recommendation {
            lines.extend(labeled_lines(
                "Recommendation:",
                recommendation,
                BODY_INDENT,
                width,
                Style::default().fg(theme.label),
                Style::default().fg(theme.text),
            ));
        }
    }
}

fn recommendation_lines(
    lines: &mut Vec<Line<'static>>,
    panel: &RecommendationsPanel<'_>,
    width: usize,
    theme: &Theme,
) {
    lines.push(Line::from(header_spans(
        Section::Recommendations,
        panel.expanded,
        "Recommendations",
        theme,
    )));

    let Some(items) = &panel.items else {
        return;
    };
    if items.is_empty() {
        lines.push(Line::styled("    No recommendations", Style::default().fg(theme.muted)));
        return;
    }
    for item in items {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(theme.label)),
            Span::styled(
                item.title.to_owned(),
                Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.extend(indented_lines(
            item.description,
            BODY_INDENT,
            width,
            Style::default().fg(theme.text),
        ));
    }
}
