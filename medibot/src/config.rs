//! User configuration for medibot.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/medibot/config.toml`. Every key
//! is optional, and a missing or malformed file is a soft failure: the
//! defaults are used and the problem is logged.
//!
//! ```toml
//! server_url = "http://127.0.0.1:5000"
//! language = "hi"
//! theme = "dark"
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use medibot_core::dispatcher::DEFAULT_TIMEOUT;
use medibot_core::locale::Language;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides `server_url`.
pub const SERVER_URL_ENV: &str = "MEDIBOT_SERVER_URL";

/// Why the config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the diagnostic backend; `/chat` and `/` hang off it.
    pub server_url: String,
    /// Language code selected at startup.
    pub language: String,
    /// Built-in theme name.
    pub theme: String,
    /// Client-side bound on one chat request.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_owned(),
            language: Language::En.code().to_owned(),
            theme: "catppuccin-mocha".to_owned(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Parses `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path: path.to_owned(), source }),
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    /// Loads the config from the XDG location and applies environment overrides.
    ///
    /// Never fails; errors are logged and the defaults are used instead.
    pub fn load() -> Self {
        let path = config_path();
        let mut config = Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config unusable, falling back to defaults");
            Self::default()
        });
        config.apply_server_override(std::env::var(SERVER_URL_ENV).ok());
        config
    }

    /// Replaces `server_url` with `value` when it is set and non-blank.
    pub fn apply_server_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.server_url = url.trim().to_owned();
        }
    }

    /// The startup language; unknown codes fall back to English.
    pub fn language(&self) -> Language {
        self.language.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to English");
            Language::En
        })
    }

    /// Request timeout, never shorter than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Returns the path to the medibot config file.
///
/// Prefers `$XDG_CONFIG_HOME/medibot/config.toml`; falls back to
/// `~/.config/medibot/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("config.toml")
}

/// Returns the directory the log file is written to.
///
/// Prefers `$XDG_STATE_HOME/medibot`; falls back to `~/.local/state/medibot`.
pub fn state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

fn xdg_dir(var: &str, home_relative: &str) -> PathBuf {
    let base = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(home_relative))
        })
        .unwrap_or_else(|| PathBuf::from(home_relative));
    base.join("medibot")
}
