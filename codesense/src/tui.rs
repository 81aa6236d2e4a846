//! Terminal lifecycle for the report view.
//!
//! Entering the report switches the terminal into raw mode on the alternate
//! screen; every way out of the report (quit, back, SIGTERM, panic) must undo
//! that through [`restore`]. Messages meant for the user after the view closes
//! are printed to stderr only once the terminal is restored.

use std::io::{stdout, BufWriter, Stdout};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;

/// Crossterm backend over a buffered stdout, so one frame's escape sequences
/// go out in a few writes.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Enables raw mode, enters the alternate screen and turns on mouse capture.
///
/// # Errors
///
/// Returns `Err` if any terminal command fails. Raw mode may already be on at
/// that point, so callers still run [`restore`].
pub fn init() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stdout());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Leaves the alternate screen and disables raw mode. Idempotent.
///
/// ratatui does not restore the terminal on `Drop`, so this runs at the single
/// exit point of the event loop and from the panic hook.
///
/// # Errors
///
/// Returns `Err` if a terminal command fails.
pub fn restore() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Chains a panic hook that restores the terminal before the panic message
/// prints. Install before [`init`].
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Best effort: we are already panicking.
        let _ = restore();
        previous(info);
    }));
}

/// Registers SIGTERM and returns the flag it sets.
///
/// The main loop polls the flag; the handler itself only stores to the atomic.
///
/// # Errors
///
/// Returns `Err` if the OS refuses the registration.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
