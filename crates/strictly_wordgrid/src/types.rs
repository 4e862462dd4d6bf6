//! Core domain types for word-search grids.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A cell address on the grid, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index (y).
    pub row: usize,
    /// Column index (x).
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves by the given row/column delta, staying inside a `size`×`size` grid.
    ///
    /// Returns `None` when the step would leave the grid. There is no wraparound.
    pub fn step(self, d_row: isize, d_col: isize, size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

/// Errors raised when constructing a grid.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// Requested side length is zero or too large.
    #[display("Grid size {size} is outside 1..={}", Grid::MAX_SIZE)]
    InvalidSize {
        /// The rejected side length.
        size: usize,
    },
    /// A row does not have as many cells as there are rows.
    #[display("Row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        /// Offending row index.
        row: usize,
        /// Cells found in that row.
        len: usize,
        /// Cells required for a square grid.
        expected: usize,
    },
    /// A cell is not a single ASCII letter.
    #[display("Cell {coord} holds {found:?}, expected a single letter A-Z")]
    InvalidCell {
        /// Offending cell.
        coord: Coord,
        /// What the cell contained.
        found: String,
    },
}

/// An immutable N×N grid of uppercase letters.
///
/// Cells are stored in row-major order. There is no mutating API: a grid is
/// built once (by the generator or a validated conversion) and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Side length used by the game when none is configured.
    pub const DEFAULT_SIZE: usize = 5;

    /// Largest supported side length (64 cells).
    pub const MAX_SIZE: usize = 8;

    /// Checks that `size` is a supported side length.
    pub fn check_size(size: usize) -> Result<(), GridError> {
        if size == 0 || size > Self::MAX_SIZE {
            return Err(GridError::InvalidSize { size });
        }
        Ok(())
    }

    /// Builds a grid from already-validated uppercase cells.
    pub(crate) fn from_cells(size: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Builds a grid from rows of letters.
    ///
    /// Letters are normalized to uppercase. Rows must form a square of a
    /// supported size and every cell must be an ASCII letter.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self, GridError> {
        let size = rows.len();
        Self::check_size(size)?;

        let mut cells = Vec::with_capacity(size * size);
        for (row, letters) in rows.into_iter().enumerate() {
            if letters.len() != size {
                return Err(GridError::RaggedRow {
                    row,
                    len: letters.len(),
                    expected: size,
                });
            }
            for (col, letter) in letters.into_iter().enumerate() {
                if !letter.is_ascii_alphabetic() {
                    return Err(GridError::InvalidCell {
                        coord: Coord::new(row, col),
                        found: letter.to_string(),
                    });
                }
                cells.push(letter.to_ascii_uppercase());
            }
        }

        Ok(Self { size, cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size * size`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; grids have at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Letter at `coord`, or `None` if it lies outside the grid.
    pub fn get(&self, coord: Coord) -> Option<char> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        self.cells.get(self.index(coord)).copied()
    }

    /// Row-major cell index of an in-bounds coordinate.
    pub(crate) fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.size)
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Coord::new(row, col)))
    }

    /// Whether `letter` (any case) appears anywhere on the grid.
    pub fn contains_letter(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        self.cells.contains(&letter)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses `"CATTT/CATTT/CATTT/CATTT/CATTT"`; rows may also be separated by whitespace.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .split(|c: char| c == '/' || c.is_whitespace())
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().collect())
            .collect();
        Self::from_rows(rows)
    }
}

impl TryFrom<Vec<Vec<char>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<char>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        let mut letters = Vec::with_capacity(rows.len());
        for (row, cells) in rows.into_iter().enumerate() {
            let mut line = Vec::with_capacity(cells.len());
            for (col, cell) in cells.into_iter().enumerate() {
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => line.push(letter),
                    _ => {
                        return Err(GridError::InvalidCell {
                            coord: Coord::new(row, col),
                            found: cell,
                        });
                    }
                }
            }
            letters.push(line);
        }
        Self::from_rows(letters)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
            .map(|row| row.iter().map(char::to_string).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_in_bounds() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.step(-1, 0, 5), None);
        assert_eq!(corner.step(0, -1, 5), None);
        assert_eq!(corner.step(1, 1, 5), Some(Coord::new(1, 1)));
        assert_eq!(Coord::new(4, 4).step(1, 0, 5), None);
        assert_eq!(Coord::new(4, 4).step(0, 1, 5), None);
    }

    #[test]
    fn test_from_rows_uppercases() {
        let grid = Grid::from_rows(vec![vec!['a', 'b'], vec!['c', 'd']]).unwrap();
        assert_eq!(grid.cells(), &['A', 'B', 'C', 'D']);
        assert_eq!(grid.get(Coord::new(1, 0)), Some('C'));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec!['A', 'B'], vec!['C']]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_non_letters() {
        let err = Grid::from_rows(vec![vec!['A', '1'], vec!['C', 'D']]).unwrap_err();
        assert!(matches!(err, GridError::InvalidCell { coord, .. } if coord == Coord::new(0, 1)));
    }

    #[test]
    fn test_from_rows_rejects_empty_and_oversized() {
        assert_eq!(
            Grid::from_rows(Vec::new()).unwrap_err(),
            GridError::InvalidSize { size: 0 }
        );
        let big = vec![vec!['A'; 9]; 9];
        assert_eq!(
            Grid::from_rows(big).unwrap_err(),
            GridError::InvalidSize { size: 9 }
        );
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid: Grid = "AB/CD".parse().unwrap();
        assert_eq!(grid.get(Coord::new(2, 0)), None);
        assert_eq!(grid.get(Coord::new(0, 2)), None);
    }

    #[test]
    fn test_display_and_parse() {
        let grid: Grid = "ab cd".parse().unwrap();
        assert_eq!(grid.to_string(), "A B\nC D");
    }

    #[test]
    fn test_serde_rows_of_strings() {
        let grid: Grid = "AB/CD".parse().unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["A","B"],["C","D"]]"#);

        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        assert!(serde_json::from_str::<Grid>(r#"[["AB","C"],["D","E"]]"#).is_err());
    }
}
