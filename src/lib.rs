//! Conway's Game of Life
//!
//! A fixed-size Game of Life simulator. Worlds come from map files or random
//! seeding, are simulated until they reach a fixed point or an iteration cap,
//! and the resulting generations are played back on the console or a
//! full-screen terminal view.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod menu;
pub mod render;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use game_of_life::{GameOfLifeRules, Grid};
pub use simulation::{SimulationOutcome, SimulationRun, SimulationRunner};

use std::path::Path;

/// Load a map with the configured dimensions and simulate it
pub fn simulate_map<P: AsRef<Path>>(
    settings: &Settings,
    path: P,
) -> Result<SimulationRun, LifeError> {
    let grid = settings.map_loader().load(path)?;
    Ok(settings.runner().run(grid))
}
