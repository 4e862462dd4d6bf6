//! Strictly Boggle - Unified CLI
//!
//! Serves the word-search game over HTTP, or deals and checks boards from
//! the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use strictly_boggle::{
    AppState, Cli, Command, DictionaryLoader, Grid, ServerConfig, check_report, router,
};
use strictly_wordgrid::{generate, generate_with};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_boggle=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            dictionary,
            board_size,
        } => run_server(config, host, port, dictionary, board_size).await,
        Command::Board { size, seed } => print_board(size, seed),
        Command::Check {
            board,
            dictionary,
            word,
        } => check_word(&board, dictionary, &word),
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    dictionary: Option<PathBuf>,
    board_size: Option<usize>,
) -> Result<()> {
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(path) = dictionary {
        config = config.with_dictionary_path(path);
    }
    if let Some(size) = board_size {
        config = config.with_board_size(size);
    }
    config.validate()?;
    info!(?config, "Starting Strictly Boggle server");

    // Loaded once; shared read-only by every request.
    let dictionary = DictionaryLoader::from_file(config.dictionary_path())?;
    let state =
        AppState::new(dictionary, *config.board_size())?.with_sessions(config.session_store());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!("Server ready at http://{}/", config.bind_addr());

    axum::serve(listener, app).await?;
    Ok(())
}

/// Print a freshly generated board
#[instrument]
fn print_board(size: usize, seed: Option<u64>) -> Result<()> {
    let grid = match seed {
        Some(seed) => generate_with(size, &mut StdRng::seed_from_u64(seed))?,
        None => generate(size)?,
    };
    println!("{}", grid);
    Ok(())
}

/// Classify a word against a board given on the command line
#[instrument(skip(dictionary_path))]
fn check_word(board: &str, dictionary_path: PathBuf, word: &str) -> Result<()> {
    let grid: Grid = board
        .parse()
        .with_context(|| format!("Invalid board {:?}", board))?;
    let dictionary = DictionaryLoader::from_file(&dictionary_path)?;

    print!("{}", check_report(&grid, word, &dictionary));
    Ok(())
}
