//! Conway's rules: one classification per cell, evaluated against an
//! untouched input grid

use super::Grid;

/// What happens to a single cell in the next generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFate {
    /// Live cell with fewer than two live neighbours
    Underpopulated,
    /// Live cell with more than three live neighbours
    Overpopulated,
    /// Live cell with two or three live neighbours
    Survives,
    /// Dead cell with exactly three live neighbours
    Born,
    StaysDead,
}

impl CellFate {
    /// Whether the cell is alive after this fate is applied
    pub fn is_alive(self) -> bool {
        matches!(self, CellFate::Survives | CellFate::Born)
    }
}

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Classify a cell given its current state and live neighbour count
    pub fn classify(alive: bool, neighbors: u8) -> CellFate {
        match (alive, neighbors) {
            (true, 0..=1) => CellFate::Underpopulated,
            (true, 2..=3) => CellFate::Survives,
            (true, _) => CellFate::Overpopulated,
            (false, 3) => CellFate::Born,
            (false, _) => CellFate::StaysDead,
        }
    }

    /// Compute the next generation. The input is never modified; the result
    /// is a fresh grid that starts all dead.
    pub fn advance(current: &Grid) -> Grid {
        let mut next = Grid::new(current.height(), current.width());

        for (row, col) in current.coordinates() {
            let fate = Self::classify(current.is_alive(row, col), current.live_neighbors(row, col));
            if fate.is_alive() {
                next.set_alive(row, col, true);
            }
        }

        next
    }

    /// Apply the rules `generations` times
    pub fn advance_by(grid: &Grid, generations: usize) -> Grid {
        let mut current = grid.clone();
        for _ in 0..generations {
            current = Self::advance(&current);
        }
        current
    }

    /// Check whether the grid maps onto itself
    pub fn is_fixed_point(grid: &Grid) -> bool {
        Self::advance(grid) == *grid
    }
}
