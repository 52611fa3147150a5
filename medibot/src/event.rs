//! Event bus for medibot.
//!
//! Terminal input, timer ticks, and background-task results are normalised into
//! a single `AppEvent` enum and sent over a tokio unbounded MPSC channel. The
//! main loop is the only consumer and the only place UI state is mutated, so
//! the transcript never needs a lock.
//!
//! Two independent intervals drive the loop:
//! - **Render interval** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms) advances the pending-indicator animation.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use medibot_core::controller::Exchange;
use medibot_core::dispatcher::{BackendStatus, Dispatcher};
use medibot_core::error::TransportError;
use medibot_core::types::DiagnosticReply;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::interval;

/// How often the backend health probe is repeated.
const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (scroll wheel).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (4 Hz / 250 ms).
    Tick,
    /// Render tick; triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// Outcome of the one outstanding chat request.
    Reply(Box<Result<DiagnosticReply, TransportError>>),
    /// Result of a backend health probe.
    Health(BackendStatus),
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned into every background task; the receiver
/// (`rx`) is owned by the main event loop.
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

/// Spawns the background task that feeds terminal input and timers into `tx`.
///
/// `reader.next().fuse()` keeps `select!` from re-polling a finished stream.
/// Only `KeyEventKind::Press` is forwarded; Windows also reports releases.
/// Send errors mean the loop has exited and are ignored.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        None => {
                            let _ = tx.send(AppEvent::Quit);
                            break;
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Runs `exchange` on its own task and posts the outcome as `AppEvent::Reply`.
///
/// This is the loop's only suspension point for a chat request: the main loop
/// keeps drawing and reading keys until the reply event arrives.
pub fn spawn_exchange(exchange: Exchange, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = exchange.run().await;
        let _ = tx.send(AppEvent::Reply(Box::new(outcome)));
    });
}

/// Probes backend health now and every [`HEALTH_INTERVAL`] afterwards.
pub fn spawn_health_task(dispatcher: Arc<dyn Dispatcher>, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut every = interval(HEALTH_INTERVAL);
        loop {
            every.tick().await;
            let status = dispatcher.health().await;
            if tx.send(AppEvent::Health(status)).is_err() {
                break;
            }
        }
    });
}
