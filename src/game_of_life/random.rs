//! Random world generation

use super::Grid;
use itertools::iproduct;
use rand::Rng;

const DEFAULT_DENSITY: f64 = 0.5;

/// Fills grids of a fixed size with independently drawn cells
#[derive(Debug, Clone)]
pub struct RandomSeeder {
    height: usize,
    width: usize,
    density: f64,
}

impl RandomSeeder {
    /// `density` is the probability of each cell starting alive, clamped to
    /// [0, 1]. NaN falls back to 0.5.
    pub fn new(height: usize, width: usize, density: f64) -> Self {
        let density = if density.is_nan() {
            DEFAULT_DENSITY
        } else {
            density.clamp(0.0, 1.0)
        };
        Self {
            height,
            width,
            density,
        }
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Draw a fresh grid
    pub fn seed<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::new(self.height, self.width);
        for (row, col) in iproduct!(0..self.height, 0..self.width) {
            if rng.gen_bool(self.density) {
                grid.set_alive(row, col, true);
            }
        }
        grid
    }
}
