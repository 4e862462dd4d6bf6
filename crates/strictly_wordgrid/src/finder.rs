//! Adjacency-constrained word search.
//!
//! A word is on the board when its letters can be traced through a simple
//! path of 8-adjacent cells. The search is a depth-first descent from every
//! starting cell. Each branch carries its own copy of the visited set, so
//! sibling branches never observe each other's cells.

use crate::types::{Coord, Grid};
use tracing::{debug, instrument};

/// One of the eight neighbor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row - 1.
    Up,
    /// Row + 1.
    Down,
    /// Column - 1.
    Left,
    /// Column + 1.
    Right,
    /// Row - 1, column - 1.
    UpLeft,
    /// Row + 1, column + 1.
    DownRight,
    /// Row + 1, column - 1.
    DownLeft,
    /// Row - 1, column + 1.
    UpRight,
}

impl Direction {
    /// All directions, orthogonals first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpRight,
    ];

    /// Row and column delta.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
            Direction::UpRight => (-1, 1),
        }
    }
}

/// Branch-local visited set.
///
/// A bitmask over row-major cell indices, passed by value. `with` returns a
/// new set and leaves the caller's copy untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Seen(u64);

impl Seen {
    fn contains(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    fn with(self, index: usize) -> Self {
        Self(self.0 | (1 << index))
    }
}

/// Depth-first word finder with a configurable neighbor order.
///
/// The order only affects which witness path is reported, never whether one
/// is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFinder {
    order: [Direction; 8],
}

impl Default for WordFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl WordFinder {
    /// Finder that tries neighbors in [`Direction::ALL`] order.
    pub fn new() -> Self {
        Self {
            order: Direction::ALL,
        }
    }

    /// Finder that tries neighbors in the given order.
    pub fn with_order(order: [Direction; 8]) -> Self {
        Self { order }
    }

    /// Whether `word` can be traced on `grid`.
    pub fn exists(&self, grid: &Grid, word: &str) -> bool {
        self.find(grid, word).is_some()
    }

    /// One path of cells spelling `word`, first letter first.
    ///
    /// Comparison is case-insensitive. An empty word, or one containing a
    /// character that is not an ASCII letter, is never found.
    #[instrument(skip(self, grid), fields(size = grid.size()))]
    pub fn find(&self, grid: &Grid, word: &str) -> Option<Vec<Coord>> {
        let letters: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
        if letters.is_empty() {
            debug!("Empty word is never on the board");
            return None;
        }

        for start in grid.coords() {
            if let Some(mut path) = self.descend(grid, &letters, start, Seen::default()) {
                path.reverse();
                debug!(start = %start, len = path.len(), "Word found");
                return Some(path);
            }
        }

        debug!("Word not found from any starting cell");
        None
    }

    /// Tries to spell `letters` starting at `at`, never revisiting `seen`.
    ///
    /// On success returns the path in reverse (last letter first).
    fn descend(&self, grid: &Grid, letters: &[char], at: Coord, seen: Seen) -> Option<Vec<Coord>> {
        let (first, rest) = letters.split_first()?;

        let letter = grid.get(at)?;
        if letter != *first {
            return None;
        }

        let index = grid.index(at);
        if seen.contains(index) {
            return None;
        }

        if rest.is_empty() {
            return Some(vec![at]);
        }

        let seen = seen.with(index);
        for direction in self.order {
            let (d_row, d_col) = direction.delta();
            let Some(next) = at.step(d_row, d_col, grid.size()) else {
                continue;
            };
            if let Some(mut path) = self.descend(grid, rest, next, seen) {
                path.push(at);
                return Some(path);
            }
        }

        None
    }
}

/// Whether `word` can be spelled by a simple path of adjacent cells on `grid`.
///
/// Adjacency is 8-directional with no wraparound and each cell is used at
/// most once. Case-insensitive; an empty word returns `false`.
pub fn exists_on_board(grid: &Grid, word: &str) -> bool {
    WordFinder::new().exists(grid, word)
}

/// Like [`exists_on_board`] but returns the cells of one matching path.
pub fn find_path(grid: &Grid, word: &str) -> Option<Vec<Coord>> {
    WordFinder::new().find(grid, word)
}
