//! Event bus for codesense.
//!
//! Terminal input and the render timer are normalised into one `AppEvent`
//! enum and sent over a tokio unbounded MPSC channel. The report has no
//! background work of its own: after the initial load every event is either a
//! user action or a request to redraw.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::interval;

/// Render cadence (≈30 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only; Windows also reports releases).
    Key(KeyEvent),
    /// Click, wheel or move.
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Time to call `terminal.draw()`.
    Render,
    /// The input stream ended; the loop should shut down.
    Quit,
}

/// Sender and receiver ends of the event channel.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task feeding terminal input and render ticks into `tx`.
///
/// The task exits when the receiver is dropped or the crossterm stream ends;
/// in the latter case it sends `AppEvent::Quit` first.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut render_interval = interval(RENDER_INTERVAL);
        let mut reader = EventStream::new();

        loop {
            let render_tick = render_interval.tick();
            // fuse() so a finished stream is never polled again by select!.
            let crossterm_event = reader.next().fuse();

            let forwarded = tokio::select! {
                _ = render_tick => tx.send(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Mouse(mouse))) => tx.send(AppEvent::Mouse(mouse)),
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Ok(_)) => Ok(()),
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal input error");
                        Ok(())
                    }
                    None => {
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                },
            };
            if forwarded.is_err() {
                break;
            }
        }
    });
}
