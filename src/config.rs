//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `BOGGLE_*` environment variables. Command-line flags are applied last by
//! the binary through the `with_*` setters.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use crate::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL, SessionStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_wordgrid::Grid;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::host`].
pub const ENV_HOST: &str = "BOGGLE_HOST";
/// Environment variable overriding [`ServerConfig::port`].
pub const ENV_PORT: &str = "BOGGLE_PORT";
/// Environment variable overriding [`ServerConfig::dictionary_path`].
pub const ENV_DICTIONARY: &str = "BOGGLE_DICTIONARY";
/// Environment variable overriding [`ServerConfig::board_size`].
pub const ENV_BOARD_SIZE: &str = "BOGGLE_BOARD_SIZE";
/// Environment variable overriding [`ServerConfig::session_ttl_secs`].
pub const ENV_SESSION_TTL_SECS: &str = "BOGGLE_SESSION_TTL_SECS";
/// Environment variable overriding [`ServerConfig::max_sessions`].
pub const ENV_MAX_SESSIONS: &str = "BOGGLE_MAX_SESSIONS";

/// Configuration for the HTTP game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Word list, one word per line.
    dictionary_path: PathBuf,

    /// Side length of generated boards.
    board_size: usize,

    /// Idle seconds before a player session is dropped.
    session_ttl_secs: u64,

    /// Most player sessions kept at once.
    max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            dictionary_path: PathBuf::from("words.txt"),
            board_size: Grid::DEFAULT_SIZE,
            session_ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Defaults, overlaid with `path` if given, then with the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, an
    /// environment variable is malformed, or the result fails validation.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays `BOGGLE_*` variables from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlays `BOGGLE_*` variables obtained through `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn apply_vars(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(ENV_HOST) {
            debug!(%host, "Host from environment");
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {}={:?}: {}", ENV_PORT, port, e)))?;
            debug!(port = self.port, "Port from environment");
        }
        if let Some(path) = lookup(ENV_DICTIONARY) {
            debug!(%path, "Dictionary path from environment");
            self.dictionary_path = PathBuf::from(path);
        }
        if let Some(size) = lookup(ENV_BOARD_SIZE) {
            self.board_size = size.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {}={:?}: {}", ENV_BOARD_SIZE, size, e))
            })?;
            debug!(board_size = self.board_size, "Board size from environment");
        }
        if let Some(ttl) = lookup(ENV_SESSION_TTL_SECS) {
            self.session_ttl_secs = ttl.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {}={:?}: {}", ENV_SESSION_TTL_SECS, ttl, e))
            })?;
            debug!(session_ttl_secs = self.session_ttl_secs, "Session TTL from environment");
        }
        if let Some(max) = lookup(ENV_MAX_SESSIONS) {
            self.max_sessions = max.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {}={:?}: {}", ENV_MAX_SESSIONS, max, e))
            })?;
            debug!(max_sessions = self.max_sessions, "Session cap from environment");
        }
        Ok(self)
    }

    /// Checks that the configured values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::check_size(self.board_size)
            .map_err(|e| ConfigError::new(format!("Invalid board_size: {}", e)))?;
        if self.host.trim().is_empty() {
            return Err(ConfigError::new("host must not be empty".to_string()));
        }
        if self.max_sessions == 0 {
            return Err(ConfigError::new("max_sessions must be at least 1".to_string()));
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::new("session_ttl_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Empty session store honoring the configured TTL and capacity.
    pub fn session_store(&self) -> SessionStore {
        SessionStore::with_limits(Duration::from_secs(self.session_ttl_secs), self.max_sessions)
    }

    /// `host:port` for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
