//! Renderers that play back a fully simulated generation sequence

pub mod console;
pub mod terminal;

pub use console::ConsoleRenderer;
pub use terminal::TerminalRenderer;

use crate::game_of_life::Grid;
use anyhow::Result;
use std::time::Duration;

/// Displays generations in order, one frame per grid
pub trait Renderer {
    fn render(&mut self, generations: &[Grid]) -> Result<()>;
}

/// Sleep between frames. Nothing is slept after the last frame.
pub(crate) fn pace(delay: Duration, frame: usize, total: usize) {
    if !delay.is_zero() && frame + 1 < total {
        std::thread::sleep(delay);
    }
}
