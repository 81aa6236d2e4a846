//! Metrics grid renderer.
//!
//! One bordered card per metric, [`METRICS_PER_ROW`] to a row, in the order
//! the producer wrote them. A card shows the score in its tier color and a
//! bar whose fill is the score as a percentage of the card width.

use codesense_core::report::MetricCard;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::ui::layout::{inner_rect, METRICS_PER_ROW, METRIC_CARD_HEIGHT};

const BAR_FILLED: &str = "█";
const BAR_TRACK: &str = "░";

/// Renders the metrics grid into `area`.
pub fn render_metrics(frame: &mut Frame, area: Rect, cards: &[MetricCard<'_>], theme: &Theme) {
    if cards.is_empty() {
        let block = Block::bordered()
            .title(" METRICS ")
            .border_style(Style::default().fg(theme.border_inactive));
        frame.render_widget(
            Paragraph::new(Line::styled("No metrics reported", Style::default().fg(theme.muted)))
                .block(block),
            area,
        );
        return;
    }

    let mut y = area.y;
    for row in cards.chunks(METRICS_PER_ROW) {
        let band = Rect { y, height: METRIC_CARD_HEIGHT, ..area }.intersection(area);
        y = y.saturating_add(METRIC_CARD_HEIGHT);
        if band.height == 0 {
            break;
        }
        let columns = Layout::horizontal([Constraint::Fill(1); METRICS_PER_ROW]).split(band);
        for (card, cell) in row.iter().zip(columns.iter()) {
            render_card(frame, *cell, card, theme);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MetricCard<'_>, theme: &Theme) {
    let title = format!(" {} ", card.label.to_uppercase());
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme.border_inactive));
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let value = value_line(card, theme);
    let bar = bar_line(card, inner.width, theme);
    frame.render_widget(Paragraph::new(vec![value, bar]), inner);
}

/// Score, `/100` suffix and tier name, e.g. `85 /100  good`.
pub fn value_line(card: &MetricCard<'_>, theme: &Theme) -> Line<'static> {
    let accent = theme.tier_fg(card.tier);
    Line::from(vec![
        Span::styled(
            card.value.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" /100", Style::default().fg(theme.muted)),
        Span::styled(format!("  {}", card.tier.label()), Style::default().fg(accent)),
    ])
}

/// Builds the bar row for a card `width` cells wide.
///
/// Scores above 100 fill the whole track; the card edge clips the rest.
pub fn bar_line(card: &MetricCard<'_>, width: u16, theme: &Theme) -> Line<'static> {
    let track = usize::from(width);
    let filled = card.fill_cells(width).min(track);
    Line::from(vec![
        Span::styled(BAR_FILLED.repeat(filled), Style::default().fg(theme.tier_fg(card.tier))),
        Span::styled(BAR_TRACK.repeat(track - filled), Style::default().fg(theme.bar_track)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesense_core::score::classify;

    fn card(value: i64) -> MetricCard<'static> {
        MetricCard { label: "Quality", value, tier: classify(value) }
    }

    fn filled(line: &Line<'_>) -> usize {
        line.spans[0].content.chars().count()
    }

    #[test]
    fn bar_fill_tracks_the_score() {
        let theme = Theme::dark();
        assert_eq!(filled(&bar_line(&card(50), 20, &theme)), 10);
        assert_eq!(filled(&bar_line(&card(85), 20, &theme)), 17);
        assert_eq!(bar_line(&card(85), 20, &theme).width(), 20);
    }

    #[test]
    fn out_of_range_scores_stay_inside_the_card() {
        let theme = Theme::dark();
        assert_eq!(filled(&bar_line(&card(150), 20, &theme)), 20);
        assert_eq!(filled(&bar_line(&card(-5), 20, &theme)), 0);
        assert_eq!(bar_line(&card(-5), 20, &theme).width(), 20);
    }

    #[test]
    fn value_line_names_the_tier() {
        let theme = Theme::dark();
        assert_eq!(value_line(&card(85), &theme).to_string(), "85 /100  good");
        assert_eq!(value_line(&card(60), &theme).to_string(), "60 /100  warning");
        assert_eq!(value_line(&card(-5), &theme).to_string(), "-5 /100  critical");
    }

    #[test]
    fn bar_takes_the_tier_color() {
        let theme = Theme::dark();
        let line = bar_line(&card(40), 10, &theme);
        assert_eq!(line.spans[0].style.fg, Some(theme.tier_critical));
    }
}
