//! medibot: terminal client for the MediBot diagnostic assistant.
//!
//! Entry point for the `medibot` binary. Wires together logging, config, the
//! terminal lifecycle (`tui`), the unified event bus (`event`), the UI
//! (`ui`), and the conversation controller from `medibot-core`.
//!
//! # Startup sequence
//!
//! 1. `logging::init()`, then config and theme. Nothing touches the terminal yet.
//! 2. Build the HTTP dispatcher and the controller. The transcript opens with
//!    the greeting for the configured language.
//! 3. `install_panic_hook()` so a panic restores the terminal before printing.
//! 4. `register_sigterm()`, polled on the 50 ms heartbeat.
//! 5. `init_tui()`, then spawn the input, timer, and health tasks.
//!
//! `restore_tui()` runs after the loop exits on every non-panic path; the
//! loop itself never returns early with `?` except from a failed draw.

mod app;
mod config;
mod event;
mod join;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use medibot_core::controller::Controller;
use medibot_core::dispatcher::{Dispatcher, HttpDispatcher};
use medibot_core::locale::LocalizationTable;
use medibot_core::session::current_session_id;

use crate::event::AppEvent;
use crate::ui::keybindings::{self, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _log_guard = logging::init();

    let config = config::Config::load();
    let theme = theme::Theme::from_name(&config.theme);
    let language = config.language();

    let dispatcher: Arc<dyn Dispatcher> = Arc::new(
        HttpDispatcher::new(&config.server_url, config.request_timeout()).map_err(|e| {
            tracing::error!(error = %e, "cannot build HTTP client");
            std::io::Error::other(e)
        })?,
    );
    let session_id = current_session_id();
    tracing::info!(
        server = %config.server_url,
        session = session_id,
        language = %language,
        "medibot starting"
    );

    let controller = Controller::new(
        LocalizationTable::builtin(),
        Arc::clone(&dispatcher),
        session_id,
        language,
    );
    let mut state = app::AppState::new(controller, language);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    event::spawn_health_task(dispatcher, handler.tx.clone());
    let tx = handler.tx;
    let mut rx = handler.rx;

    // Exits only via `break` so `restore_tui()` below is always reached.
    let outcome = 'event_loop: loop {
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            break 'event_loop Err(e);
                        }
                    }
                    Some(AppEvent::Key(key)) => match keybindings::handle_key(key, &mut state) {
                        KeyAction::Continue => {}
                        KeyAction::Quit => break 'event_loop Ok(()),
                        KeyAction::Send(exchange) => event::spawn_exchange(exchange, tx.clone()),
                        KeyAction::Join(link) => {
                            if let Err(e) = join::open_link(&link) {
                                tracing::warn!(error = %e, link = %link, "cannot open meet link");
                            }
                        }
                    },
                    Some(AppEvent::Mouse(mouse)) => keybindings::handle_mouse(mouse, &mut state),
                    Some(AppEvent::Reply(outcome)) => {
                        // The reply is rendered in the language selected now.
                        state.controller.on_reply(*outcome, state.language);
                    }
                    Some(AppEvent::Health(status)) => {
                        if status != state.backend_status {
                            tracing::info!(?status, "backend status changed");
                        }
                        state.backend_status = status;
                    }
                    Some(AppEvent::Tick) => state.tick = state.tick.wrapping_add(1),
                    // The next Render picks up the new size from `frame.area()`.
                    Some(AppEvent::Resize(_, _)) => {}
                    Some(AppEvent::Quit) | None => break 'event_loop Ok(()),
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
        }
    };

    tui::restore_tui()?;
    tracing::info!("medibot exiting");
    outcome
}
