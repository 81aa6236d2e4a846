//! Syntax highlighting for the Original and Corrected code tabs.
//!
//! Code is shown verbatim: highlighting only attaches colors, it never drops
//! or reorders characters. The one substitution is tab → four spaces, because
//! a raw tab has no cell width in the terminal buffer.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";
const TAB: &str = "    ";

/// Highlights `code` into owned lines, one per source line.
///
/// The grammar is chosen by `ext`; when that only resolves to plain text the
/// first line is tried (shebangs, `<?php`, ...). An empty string yields no
/// lines.
pub fn highlight_source(code: &str, ext: &str) -> Vec<Line<'static>> {
    let Some(theme) = THEMES.themes.get(HIGHLIGHT_THEME) else {
        return plain_lines(code);
    };
    let mut highlighter = HighlightLines::new(pick_syntax(code, ext), theme);

    LinesWithEndings::from(code)
        .map(|line| match highlighter.highlight_line(line, &SYNTAXES) {
            Ok(ranges) => Line::from(
                ranges
                    .into_iter()
                    .filter_map(|(style, text)| {
                        let text = text.trim_end_matches(['\n', '\r']);
                        (!text.is_empty()).then(|| to_span(style, text))
                    })
                    .collect::<Vec<_>>(),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "highlighting failed, showing plain line");
                Line::raw(expand_tabs(line.trim_end_matches(['\n', '\r'])))
            }
        })
        .collect()
}

fn pick_syntax(code: &str, ext: &str) -> &'static SyntaxReference {
    let plain = SYNTAXES.find_syntax_plain_text();
    SYNTAXES
        .find_syntax_by_extension(ext)
        .filter(|s| s.name != plain.name)
        .or_else(|| SYNTAXES.find_syntax_by_first_line(code))
        .unwrap_or(plain)
}

fn plain_lines(code: &str) -> Vec<Line<'static>> {
    code.lines().map(|l| Line::raw(expand_tabs(l))).collect()
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', TAB)
}

/// Converts a syntect style to a ratatui span. Only the foreground and font
/// style are kept so the panel background shows through.
fn to_span(style: syntect::highlighting::Style, text: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut out = Style::default();
    if fg.a > 0 {
        out = out.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(expand_tabs(text), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn highlighting_keeps_text_verbatim() {
        let code = "fn main() {\n\tlet x = 1; // one\n}\n";
        let lines = highlight_source(code, "rs");
        assert_eq!(texts(&lines), ["fn main() {", "    let x = 1; // one", "}"]);
    }

    #[test]
    fn blank_lines_are_kept() {
        let lines = highlight_source("a = 1\n\nb = 2", "py");
        assert_eq!(texts(&lines), ["a = 1", "", "b = 2"]);
    }

    #[test]
    fn empty_source_has_no_lines() {
        assert!(highlight_source("", "txt").is_empty());
    }

    #[test]
    fn unknown_extension_falls_back_to_plain_text() {
        let lines = highlight_source("just words", "nope");
        assert_eq!(texts(&lines), ["just words"]);
    }
}
