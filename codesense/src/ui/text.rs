//! Text shaping shared by the comparison and findings panels.
//!
//! Both panels pre-wrap their content so that one `Line` is one screen row;
//! scroll offsets and header-row hit testing can then count lines directly.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of one character; control characters count as zero.
fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Greedy word wrap to `width` display columns.
///
/// Explicit newlines start new rows, words wider than `width` are split
/// mid-word, and runs of spaces collapse. An empty string yields no rows.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut used = 0usize;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if used > 0 && used + 1 + word_width > width {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            if word_width > width {
                for piece in chunk(word, width) {
                    if used > 0 {
                        rows.push(std::mem::take(&mut row));
                    }
                    used = piece.width();
                    row = piece;
                }
                continue;
            }
            if used > 0 {
                row.push(' ');
                used += 1;
            }
            row.push_str(word);
            used += word_width;
        }
        rows.push(row);
    }
    rows
}

/// Splits `text` into rows of at most `width` display columns, keeping every
/// character including spaces. An empty string yields one empty row so blank
/// code lines keep their place.
pub fn chunk(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = char_width(ch);
        if used > 0 && used + w > width {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(ch);
        used += w;
    }
    rows.push(row);
    rows
}

/// Splits a styled line into rows of at most `width` display columns,
/// keeping each span's style on both sides of a break.
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;
    for span in &line.spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            let w = char_width(ch);
            if used > 0 && used + w > width {
                if !piece.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            piece.push(ch);
            used += w;
        }
        if !piece.is_empty() {
            row.push(Span::styled(piece, span.style));
        }
    }
    rows.push(Line::from(row));
    rows
}

/// Truncates or space-pads `text` to exactly `width` display columns.
///
/// A wide character that would straddle the edge is replaced by padding.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Wraps `label text` at `width`, indented by `indent` spaces, with the label
/// styled separately on the first row.
pub fn labeled_lines(
    label: &str,
    text: &str,
    indent: usize,
    width: usize,
    label_style: Style,
    text_style: Style,
) -> Vec<Line<'static>> {
    let pad = " ".repeat(indent);
    let full = format!("{label} {text}");
    wrap_text(&full, width.saturating_sub(indent))
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            if i == 0 {
                if let Some(rest) = row.strip_prefix(label) {
                    return Line::from(vec![
                        Span::raw(pad.clone()),
                        Span::styled(label.to_owned(), label_style),
                        Span::styled(rest.to_owned(), text_style),
                    ]);
                }
            }
            Line::from(vec![Span::raw(pad.clone()), Span::styled(row, text_style)])
        })
        .collect()
}

/// Wraps `text` at `width` with every row indented by `indent` spaces.
pub fn indented_lines(text: &str, indent: usize, width: usize, style: Style) -> Vec<Line<'static>> {
    let pad = " ".repeat(indent);
    wrap_text(text, width.saturating_sub(indent))
        .into_iter()
        .map(|row| Line::from(vec![Span::raw(pad.clone()), Span::styled(row, style)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("Remove it", 20), ["Remove it"]);
        assert_eq!(wrap_text("aaa bbb ccc", 7), ["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("aaa bbb ccc", 3), ["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap_text("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("ab abcdefgh", 4), ["ab", "abcd", "efgh"]);
    }

    #[test]
    fn newlines_and_empty_input() {
        assert_eq!(wrap_text("a\n\nb", 10), ["a", "", "b"]);
        assert!(wrap_text("", 10).is_empty());
        assert_eq!(wrap_text("x", 0), ["x"]);
    }

    #[test]
    fn widths_count_display_cells() {
        assert_eq!(wrap_text("日本語 テキスト", 7), ["日本語", "テキス", "ト"]);
        assert_eq!(fit("日本", 5), "日本 ");
        assert_eq!(fit("日本", 3), "日 ");
        assert_eq!(fit("日本", 3).width(), 3);
    }

    #[test]
    fn chunk_keeps_every_character() {
        assert_eq!(chunk("let total = 1", 5), ["let t", "otal ", "= 1"]);
        assert_eq!(chunk("", 5), [""]);
        assert_eq!(chunk("ab日", 3), ["ab", "日"]);
    }

    #[test]
    fn wrap_line_keeps_span_styles() {
        use ratatui::style::Color;
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![Span::styled("abcd", red), Span::raw("efg")]);
        let rows = wrap_line(&line, 3);
        let text: Vec<String> = rows.iter().map(|l| l.to_string()).collect();
        assert_eq!(text, ["abc", "def", "g"]);
        assert_eq!(rows[1].spans[0].style, red);
        assert_eq!(rows[1].spans[1].content, "ef");
        assert_eq!(wrap_line(&Line::default(), 3).len(), 1);
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn label_styled_on_first_row_only() {
        let lines = labeled_lines(
            "Recommendation:",
            "Rename fooBar to foo_bar",
            2,
            30,
            Style::default(),
            Style::default(),
        );
        let rows: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rows, ["  Recommendation: Rename", "  fooBar to foo_bar"]);
        assert_eq!(lines[0].spans[1].content, "Recommendation:");
    }
}
