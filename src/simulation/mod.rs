//! Simulation driving: fixed-point detection and stable world search

pub mod runner;
pub mod stable;

pub use runner::{RunSummary, SimulationOutcome, SimulationRun, SimulationRunner};
pub use stable::{StableSearchOutcome, StableWorldSearch};
