//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so log lines go to
//! `$XDG_STATE_HOME/medibot/medibot.log` through a non-blocking writer instead
//! of stdout/stderr. Filtering follows `RUST_LOG` and defaults to `info` for
//! both medibot crates.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config;

/// Installs the global subscriber.
///
/// Returns the writer guard, which must live until the process exits or
/// buffered lines are lost. Returns `None` (logging disabled) when the log
/// directory cannot be created.
pub fn init() -> Option<WorkerGuard> {
    let dir = config::state_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("medibot: logging disabled, cannot create {:?}: {}", dir, e);
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, "medibot.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medibot=info,medibot_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Some(guard)
}
