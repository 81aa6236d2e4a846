//! Keybinding dispatcher.
//!
//! Translates raw crossterm key and mouse events into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to keep going. The
//! dispatcher branches first on `state.mode` so the help overlay and the
//! report have isolated handlers.

use codesense_core::view_state::{ComparisonTab, Section};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};
use crate::ui::layout::inner_rect;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: u16 = 3;

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running and redraw.
    Continue,
    /// Exit the application.
    Quit,
    /// Leave the report and return to the code entry view.
    Back,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Ctrl-d / Ctrl-b must win over the plain `d` and `b` bindings below.
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        // Comparison tabs
        KeyCode::Char('o') => state.select_tab(ComparisonTab::Original),
        KeyCode::Char('c') => state.select_tab(ComparisonTab::Corrected),
        KeyCode::Char('d') => state.select_tab(ComparisonTab::Changes),
        KeyCode::Tab => state.next_tab(),
        KeyCode::BackTab => state.prev_tab(),

        // Section toggles
        KeyCode::Char(ch @ '1'..='4') => {
            let index = usize::from(ch as u8 - b'1');
            state.toggle_section(Section::ALL[index]);
        }

        // Panel focus
        KeyCode::Char('H') => state.focus = PanelFocus::Comparison,
        KeyCode::Char('L') => state.focus = PanelFocus::Findings,

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }

        KeyCode::Char('b') | KeyCode::Backspace => return KeyAction::Back,
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,

        _ => {}
    }
    KeyAction::Continue
}

/// Handles j / k / g / G and the Ctrl page keys.
///
/// Returns `None` when the key should fall through to the rest of the
/// Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        KeyCode::PageDown => state.full_page_down(),
        KeyCode::PageUp => state.full_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// `?`, `Esc` or `q` closes the overlay; j/k/g/G scroll it; the rest is ignored.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: click-to-focus, header clicks, and the scroll wheel.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if state.mode == Mode::Normal => {
            handle_mouse_click(mouse.column, mouse.row, state);
        }
        MouseEventKind::ScrollUp => scroll_wheel(state, false),
        MouseEventKind::ScrollDown => scroll_wheel(state, true),
        _ => {}
    }
    KeyAction::Continue
}

/// Focuses the clicked panel. A click on a section header in the findings
/// panel also toggles that section.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) {
    let pos = Position { x: col, y: row };
    let [comparison, findings] = state.panel_rects;

    if comparison.contains(pos) {
        state.focus = PanelFocus::Comparison;
    } else if findings.contains(pos) {
        state.focus = PanelFocus::Findings;
        let inner = inner_rect(findings);
        if inner.contains(pos) {
            let line = usize::from(row - inner.y) + usize::from(state.findings_scroll);
            state.toggle_section_at_line(line);
        }
    }
}

fn scroll_wheel(state: &mut AppState, down: bool) {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = if down {
            state.help_scroll.saturating_add(WHEEL_LINES)
        } else {
            state.help_scroll.saturating_sub(WHEEL_LINES)
        };
    } else if down {
        state.scroll_down(WHEEL_LINES);
    } else {
        state.scroll_up(WHEEL_LINES);
    }
}
