//! Pure word-search grid logic.
//!
//! - [`generate`] builds a random N×N letter grid.
//! - [`exists_on_board`] decides whether a word traces a simple path of
//!   8-adjacent cells.
//! - [`classify`] combines dictionary membership with the board search into
//!   a [`Verdict`].
//!
//! # Example
//!
//! ```
//! use strictly_wordgrid::{Dictionary, Grid, Verdict, classify};
//!
//! let grid: Grid = "CATTT/CATTT/CATTT/CATTT/CATTT".parse()?;
//! let dictionary = Dictionary::from_words(["cat", "impossible"]);
//!
//! assert_eq!(classify(&grid, "cat", &dictionary), Verdict::Ok);
//! assert_eq!(classify(&grid, "impossible", &dictionary), Verdict::NotOnBoard);
//! assert_eq!(classify(&grid, "xyzzy", &dictionary), Verdict::NotAWord);
//! # Ok::<(), strictly_wordgrid::GridError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classifier;
mod finder;
mod generator;
mod lexicon;
mod types;

pub use classifier::{Verdict, classify};
pub use finder::{Direction, WordFinder, exists_on_board, find_path};
pub use generator::{ALPHABET, generate, generate_with};
pub use lexicon::{Dictionary, Lexicon};
pub use types::{Coord, Grid, GridError};
