//! Configuration settings for the simulator

use crate::game_of_life::{MapLoader, RandomSeeder};
use crate::simulation::{SimulationRunner, StableWorldSearch};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub maps: MapConfig,
    pub random: RandomConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub height: usize,
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub max_iterations: usize,
    /// Attempts allowed when searching for a stable random world
    pub stable_attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub directory: PathBuf,
    pub alive_char: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomConfig {
    pub density: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub frame_delay_ms: u64,
    pub alive_glyph: String,
    pub dead_glyph: String,
    pub terminal_alive_glyph: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height: 30,
            width: 100,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            stable_attempts: 100,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("maps"),
            alive_char: '*',
        }
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            density: 0.5,
            seed: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 100,
            alive_glyph: "☼".to_string(),
            dead_glyph: " ".to_string(),
            terminal_alive_glyph: "•".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            simulation: SimulationConfig::default(),
            maps: MapConfig::default(),
            random: RandomConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file when it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.height == 0 || self.grid.width == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.height,
                self.grid.width
            );
        }

        if self.simulation.stable_attempts == 0 {
            anyhow::bail!("Stable world attempts must be positive");
        }

        if !(0.0..=1.0).contains(&self.random.density) {
            anyhow::bail!("Random density must be between 0 and 1, got {}", self.random.density);
        }

        if self.render.alive_glyph.is_empty()
            || self.render.dead_glyph.is_empty()
            || self.render.terminal_alive_glyph.is_empty()
        {
            anyhow::bail!("Render glyphs cannot be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_iterations) = cli_overrides.max_iterations {
            self.simulation.max_iterations = max_iterations;
        }
        if let Some(seed) = cli_overrides.seed {
            self.random.seed = Some(seed);
        }
        if let Some(delay_ms) = cli_overrides.delay_ms {
            self.render.frame_delay_ms = delay_ms;
        }
        if let Some(ref maps_dir) = cli_overrides.maps_dir {
            self.maps.directory = maps_dir.clone();
        }
    }

    pub fn map_loader(&self) -> MapLoader {
        MapLoader::new(self.grid.height, self.grid.width, self.maps.alive_char)
    }

    pub fn seeder(&self) -> RandomSeeder {
        RandomSeeder::new(self.grid.height, self.grid.width, self.random.density)
    }

    pub fn runner(&self) -> SimulationRunner {
        SimulationRunner::new(self.simulation.max_iterations)
    }

    pub fn stable_search(&self) -> StableWorldSearch {
        StableWorldSearch::new(self.seeder(), self.runner(), self.simulation.stable_attempts)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_iterations: Option<usize>,
    pub seed: Option<u64>,
    pub delay_ms: Option<u64>,
    pub maps_dir: Option<PathBuf>,
}
