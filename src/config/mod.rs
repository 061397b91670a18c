//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    CliOverrides, GridConfig, MapConfig, RandomConfig, RenderConfig, Settings, SimulationConfig,
};
