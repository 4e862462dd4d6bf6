//! Command-line interface for strictly_boggle.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_wordgrid::{Grid, Lexicon, classify, find_path};

/// Strictly Boggle - word-search puzzle server
#[derive(Parser, Debug)]
#[command(name = "strictly_boggle")]
#[command(about = "Word-search puzzle server: deal letter grids and check words", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Word list, one word per line
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Side length of dealt boards
        #[arg(long)]
        board_size: Option<usize>,
    },

    /// Print a randomly generated board
    Board {
        /// Side length
        #[arg(short, long, default_value = "5")]
        size: usize,

        /// Seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify a word against a board
    Check {
        /// Board rows separated by '/', e.g. CATTT/CATTT/CATTT/CATTT/CATTT
        #[arg(short, long)]
        board: String,

        /// Word list, one word per line
        #[arg(short, long, default_value = "words.txt")]
        dictionary: PathBuf,

        /// Word to check
        word: String,
    },
}

/// Output of `check`: the verdict token, then the cells of one witness path
/// when the word scores.
///
/// The word is trimmed and lowercased first, as the HTTP route does.
pub fn check_report<L: Lexicon + ?Sized>(grid: &Grid, word: &str, dictionary: &L) -> String {
    let word = word.trim().to_lowercase();
    let verdict = classify(grid, &word, dictionary);
    let mut report = format!("{}\n", verdict);

    if verdict.is_ok()
        && let Some(path) = find_path(grid, &word)
    {
        let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
        report.push_str(&cells.join(" -> "));
        report.push('\n');
    }
    report
}
