//! Scrolling console output, one block of text per generation

use super::{pace, Renderer};
use crate::config::RenderConfig;
use crate::game_of_life::Grid;
use anyhow::{Context, Result};
use std::io::{self, Stdout, Write};
use std::time::Duration;

const SEPARATOR: &str = " --- ";

pub struct ConsoleRenderer<W: Write> {
    out: W,
    alive: String,
    dead: String,
    delay: Duration,
}

impl ConsoleRenderer<Stdout> {
    pub fn stdout(config: &RenderConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, config: &RenderConfig) -> Self {
        Self {
            out,
            alive: config.alive_glyph.clone(),
            dead: config.dead_glyph.clone(),
            delay: config.frame_delay(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, grid: &Grid) -> io::Result<()> {
        for row in 0..grid.height() {
            writeln!(self.out, "{}", grid.row_string(row, &self.alive, &self.dead))?;
        }
        writeln!(self.out, "{}", SEPARATOR)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, generations: &[Grid]) -> Result<()> {
        for (frame, grid) in generations.iter().enumerate() {
            self.write_frame(grid)
                .with_context(|| format!("Failed to print generation {}", frame))?;
            pace(self.delay, frame, generations.len());
        }
        Ok(())
    }
}
