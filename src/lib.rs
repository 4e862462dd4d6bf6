//! Strictly Boggle library - word-search puzzle server
//!
//! The puzzle logic lives in [`strictly_wordgrid`]; this crate supplies the
//! pieces around it.
//!
//! # Architecture
//!
//! - **Dictionary**: word list loading ([`DictionaryLoader`])
//! - **Config**: layered server configuration ([`ServerConfig`])
//! - **Session**: per-player board and score counters ([`SessionStore`])
//! - **Server**: axum routes for dealing boards, checking words, posting scores
//!
//! # Example
//!
//! ```no_run
//! use strictly_boggle::{AppState, DictionaryLoader, ServerConfig, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?;
//! let dictionary = DictionaryLoader::from_file(config.dictionary_path())?;
//! let app = router(AppState::new(dictionary, *config.board_size())?);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod dictionary;
mod server;
mod session;

// Crate-level exports - CLI
pub use cli::{Cli, Command, check_report};

// Crate-level exports - Configuration
pub use config::{
    ConfigError, ENV_BOARD_SIZE, ENV_DICTIONARY, ENV_HOST, ENV_MAX_SESSIONS, ENV_PORT,
    ENV_SESSION_TTL_SECS, ServerConfig,
};

// Crate-level exports - Dictionary loading
pub use dictionary::{DictionaryError, DictionaryLoader};

// Crate-level exports - Server
pub use server::{
    AppState, CheckWordQuery, CheckWordResponse, NewBoardResponse, PostScoreRequest,
    PostScoreResponse, SESSION_COOKIE, ServerError, router,
};

// Crate-level exports - Session management
pub use session::{
    DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL, PlayerSession, ScoreOutcome, SessionError,
    SessionId, SessionStore,
};

// Crate-level exports - Puzzle core
pub use strictly_wordgrid::{Coord, Dictionary, Grid, GridError, Lexicon, Verdict};
