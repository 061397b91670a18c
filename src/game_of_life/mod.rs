//! Game of Life core: grid, rules, map files and random worlds

pub mod grid;
pub mod rules;
pub mod io;
pub mod random;

pub use grid::{Grid, GridError};
pub use rules::{CellFate, GameOfLifeRules};
pub use io::{create_example_maps, save_map, MapLoader};
pub use random::RandomSeeder;
