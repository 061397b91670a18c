//! Fixed-size grid of live and dead cells

use itertools::iproduct;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Neighbour offsets, clockwise from the cell directly above.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),  // top
    (-1, 1),  // top-right
    (0, 1),   // right
    (1, 1),   // down-right
    (1, 0),   // down
    (1, -1),  // down-left
    (0, -1),  // left
    (-1, -1), // top-left
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinates ({row}, {col}) out of bounds for {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("grid cannot be empty")]
    Empty,

    #[error("row {row} has length {found}, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A `height` x `width` matrix of cells, `true` meaning alive.
///
/// Dimensions are fixed at construction. Equality compares dimensions and
/// every cell, which is what stabilization detection relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![false; height * width],
        }
    }

    /// Create a grid from rows of cells
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        if width == 0 {
            return Err(GridError::Empty);
        }

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    found: cells.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.contains(row, col) {
            Ok(self.index(row, col))
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Get the state of a cell
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check_bounds(row, col).map(|idx| self.cells[idx])
    }

    /// Set the state of a cell
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), GridError> {
        let idx = self.check_bounds(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Unchecked read for coordinates the caller already knows are inside
    #[inline]
    pub(crate) fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub(crate) fn set_alive(&mut self, row: usize, col: usize, value: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    /// Count living neighbours of a cell. Neighbours past the edge count as dead.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.contains(r, c).then(|| self.is_alive(r, c))
            })
            .filter(|&alive| alive)
            .count() as u8
    }

    /// Iterate over every coordinate in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.coordinates()
            .filter(|&(row, col)| self.is_alive(row, col))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of living cells, 0.0 for a zero-sized grid
    pub fn density(&self) -> f64 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.living_count() as f64 / self.cells.len() as f64
        }
    }

    /// Render one row with the given glyphs
    pub(crate) fn row_string(&self, row: usize, alive: &str, dead: &str) -> String {
        (0..self.width)
            .map(|col| if self.is_alive(row, col) { alive } else { dead })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            writeln!(f, "{}", self.row_string(row, "*", "."))?;
        }
        Ok(())
    }
}
