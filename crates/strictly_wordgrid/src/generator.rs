//! Random board generation.

use crate::types::{Grid, GridError};
use rand::Rng;
use tracing::{debug, instrument};

/// The 26 letters a cell may hold.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Generates a fresh `size`×`size` grid using the thread-local RNG.
///
/// Each cell is drawn independently and uniformly from [`ALPHABET`].
///
/// # Errors
///
/// Returns [`GridError::InvalidSize`] if `size` is zero or above [`Grid::MAX_SIZE`].
#[instrument]
pub fn generate(size: usize) -> Result<Grid, GridError> {
    generate_with(size, &mut rand::thread_rng())
}

/// Generates a fresh grid drawing letters from the supplied RNG.
///
/// # Errors
///
/// Returns [`GridError::InvalidSize`] if `size` is zero or above [`Grid::MAX_SIZE`].
#[instrument(skip(rng))]
pub fn generate_with<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Grid, GridError> {
    Grid::check_size(size)?;

    let cells: Vec<char> = (0..size * size)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect();

    debug!(size, "Generated board");
    Ok(Grid::from_cells(size, cells))
}
