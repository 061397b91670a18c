//! Full-screen playback. Each generation is redrawn in place on the
//! alternate screen.

use super::Renderer;
use crate::config::RenderConfig;
use crate::game_of_life::Grid;
use anyhow::{Context, Result};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::{cursor, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use tracing::debug;

pub struct TerminalRenderer<W: Write> {
    out: W,
    alive: String,
    dead: String,
    delay: Duration,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(config: &RenderConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: &RenderConfig) -> Self {
        Self {
            out,
            alive: config.terminal_alive_glyph.clone(),
            dead: config.dead_glyph.clone(),
            delay: config.frame_delay(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn enter(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        self.out.flush()
    }

    fn leave(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        self.out.flush()
    }

    fn draw_frame(&mut self, grid: &Grid) -> Result<()> {
        for row in 0..grid.height() {
            let y = u16::try_from(row).context("Grid is too tall for the terminal")?;
            queue!(self.out, cursor::MoveTo(0, y))?;

            for col in 0..grid.width() {
                if grid.is_alive(row, col) {
                    queue!(self.out, PrintStyledContent(self.alive.as_str().green()))?;
                } else {
                    queue!(self.out, Print(&self.dead))?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw_all(&mut self, generations: &[Grid]) -> Result<()> {
        for (frame, grid) in generations.iter().enumerate() {
            self.draw_frame(grid)
                .with_context(|| format!("Failed to draw generation {}", frame))?;
            // The last frame stays on screen for one delay before the screen closes
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, generations: &[Grid]) -> Result<()> {
        self.enter().context("Failed to open the terminal screen")?;
        debug!(frames = generations.len(), "drawing generations");

        let drawn = self.draw_all(generations);
        let restored = self.leave().context("Failed to restore the terminal");

        drawn.and(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        let config = RenderConfig {
            frame_delay_ms: 0,
            ..RenderConfig::default()
        };
        TerminalRenderer::new(Vec::new(), &config)
    }

    #[test]
    fn test_draws_inside_alternate_screen() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, true).unwrap();

        let mut renderer = renderer();
        renderer.render(&[grid.clone(), grid]).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();

        let enter = output.find("\x1b[?1049h").unwrap();
        let leave = output.find("\x1b[?1049l").unwrap();
        let glyph = output.find('•').unwrap();
        assert!(enter < glyph && glyph < leave);
        assert_eq!(output.matches('•').count(), 2);
    }

    #[test]
    fn test_restores_screen_with_no_frames() {
        let mut renderer = renderer();
        renderer.render(&[]).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("\x1b[?1049l"));
    }
}
