//! Error types shared by the map loader, the menu session and the renderers

use crate::game_of_life::GridError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("map file does not exist: {}", path.display())]
    MapNotFound { path: PathBuf },

    #[error("failed to read map file {}: {source}", path.display())]
    MapUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not an option: {0:?}")]
    InvalidInput(String),

    #[error("no world selected, load or generate one first")]
    NoWorld,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LifeError {
    /// Errors the menu reports and recovers from. Grid errors are engine
    /// defects and console I/O errors leave nothing to prompt with.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LifeError::Grid(_) | LifeError::Io(_))
    }
}
