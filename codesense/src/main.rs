//! codesense: terminal view of a code review result.
//!
//! Entry point for the `codesense` binary. Wires together the handoff store
//! (`codesense-core`), terminal lifecycle (`tui`), event bus (`event`), report
//! renderer (`ui`) and theme system (`theme`).
//!
//! # Startup sequence
//!
//! 1. Parse arguments and load config; neither touches the terminal.
//! 2. Start file logging under `.codesense/`.
//! 3. Mount the report: read the handoff slots once. With nothing to show,
//!    exit with status 2 without entering the alternate screen.
//! 4. `install_panic_hook()`, `register_sigterm()`, `tui::init()`, then the
//!    event task.
//!
//! `tui::restore()` runs once after the event loop exits, whichever way it
//! exits. The panic hook covers panics.

mod app;
mod cli;
mod config;
mod event;
mod highlight;
mod logging;
mod theme;
mod tui;
mod ui;

use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use anyhow::Context as _;
use clap::Parser as _;
use codesense_core::store::{self, MemoryStore, Navigator, ORIGINAL_CODE_KEY, REVIEW_RESULT_KEY};
use codesense_core::{db, ReviewSession};

use crate::ui::keybindings::{self, KeyAction};

/// Exit status when there is no review to show and the caller should return
/// the user to code entry.
const EXIT_TO_ENTRY: u8 = 2;

/// Host-side navigation: records the request so `main` can exit accordingly.
#[derive(Debug, Default)]
struct EntryRedirect {
    requested: bool,
}

impl Navigator for EntryRedirect {
    fn navigate_to_entry(&mut self) {
        tracing::info!("navigating back to code entry");
        self.requested = true;
    }
}

/// Reads `path` into `store` under `key`. A missing file leaves the slot empty.
fn read_slot(store: &mut MemoryStore, key: &str, path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            store.insert(key, contents);
        }
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "handoff file unreadable"),
    }
}

/// Collects the handoff slots from files or the handoff database.
///
/// Database errors are logged and yield an empty store, which the mount
/// step then reports as "nothing to show".
async fn collect_slots(cli: &cli::Cli, config: &config::Config) -> MemoryStore {
    if let Some(result) = &cli.result {
        let mut slots = MemoryStore::new();
        read_slot(&mut slots, REVIEW_RESULT_KEY, result);
        if let Some(original) = &cli.original {
            read_slot(&mut slots, ORIGINAL_CODE_KEY, original);
        }
        return slots;
    }

    match db::read_handoff(&config.handoff_db).await {
        Ok(slots) => slots,
        Err(e) => {
            tracing::error!(db = %config.handoff_db.display(), error = %e, "handoff store unavailable");
            MemoryStore::new()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    let (config, config_warning) = config::Config::load();
    let config = config.merge_cli(&cli);

    std::fs::create_dir_all(config::STATE_DIR)
        .with_context(|| format!("creating {}", config::STATE_DIR))?;
    logging::init(&Path::new(config::STATE_DIR).join("codesense.log"), &config.log_level)
        .context("opening log file")?;
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }

    let slots = collect_slots(&cli, &config).await;
    let mut redirect = EntryRedirect::default();
    let Some(session) = store::mount(&slots, &mut redirect) else {
        debug_assert!(redirect.requested);
        eprintln!("codesense: no review result to display; returning to code entry");
        return Ok(ExitCode::from(EXIT_TO_ENTRY));
    };

    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::new(&session, &config.syntax);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm().context("registering SIGTERM handler")?;
    let mut terminal = tui::init().context("initialising terminal")?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());

    let outcome = run(&mut terminal, handler, &session, &mut state, &theme, &term_flag).await;

    // Single exit point for terminal restore; runs before any loop error surfaces.
    tui::restore().context("restoring terminal")?;
    let action = outcome?;
    tracing::info!(?action, "report closed");
    Ok(ExitCode::from(exit_status(action, &mut redirect)))
}

/// Maps the action that closed the report to a process exit status.
///
/// `Back` hands control to the navigator and asks the caller to reopen code
/// entry; every other way out is a plain success.
fn exit_status(action: KeyAction, navigator: &mut impl Navigator) -> u8 {
    match action {
        KeyAction::Back => {
            navigator.navigate_to_entry();
            EXIT_TO_ENTRY
        }
        KeyAction::Quit | KeyAction::Continue => 0,
    }
}

/// Runs the event loop until quit, back, SIGTERM or channel close.
///
/// Returns the action that ended the loop (`Quit` for SIGTERM and close).
async fn run(
    terminal: &mut tui::Tui,
    handler: event::EventHandler,
    session: &ReviewSession,
    state: &mut app::AppState,
    theme: &theme::Theme,
    term_flag: &std::sync::atomic::AtomicBool,
) -> anyhow::Result<KeyAction> {
    let mut rx = handler.rx;
    loop {
        tokio::select! {
            // Heartbeat so SIGTERM is seen even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {}
            maybe_event = rx.recv() => {
                let action = match maybe_event {
                    Some(event::AppEvent::Render) => {
                        terminal.draw(|frame| ui::render(frame, session, state, theme))?;
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::Key(key)) => keybindings::handle_key(key, state),
                    Some(event::AppEvent::Mouse(mouse)) => keybindings::handle_mouse(mouse, state),
                    // The next Render picks up the new size from `frame.area()`.
                    Some(event::AppEvent::Resize(..)) => KeyAction::Continue,
                    Some(event::AppEvent::Quit) | None => KeyAction::Quit,
                };
                if action != KeyAction::Continue {
                    return Ok(action);
                }
            }
        }
        if term_flag.load(Ordering::Relaxed) {
            tracing::info!("SIGTERM received");
            return Ok(KeyAction::Quit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_returns_to_code_entry() {
        let mut redirect = EntryRedirect::default();
        assert_eq!(exit_status(KeyAction::Back, &mut redirect), EXIT_TO_ENTRY);
        assert!(redirect.requested);
    }

    #[test]
    fn quit_exits_cleanly_without_navigating() {
        let mut redirect = EntryRedirect::default();
        assert_eq!(exit_status(KeyAction::Quit, &mut redirect), 0);
        assert!(!redirect.requested);
    }
}
