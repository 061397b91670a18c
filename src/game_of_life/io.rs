//! Map file loading and saving
//!
//! A map is plain text with one row per line and one character per column.
//! The configured alive character marks a live cell, anything else is dead.
//! Rows and columns past the configured dimensions are ignored.

use super::Grid;
use crate::error::LifeError;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Character written for live cells when saving
pub const SAVE_ALIVE_CHAR: char = '*';
/// Character written for dead cells when saving
pub const SAVE_DEAD_CHAR: char = '.';

/// Reads map files into grids of a fixed size
#[derive(Debug, Clone)]
pub struct MapLoader {
    height: usize,
    width: usize,
    alive_char: char,
}

impl MapLoader {
    pub fn new(height: usize, width: usize, alive_char: char) -> Self {
        Self {
            height,
            width,
            alive_char,
        }
    }

    /// Copy one line of map text into a grid row
    fn fill_row<I: Iterator<Item = char>>(&self, grid: &mut Grid, row: usize, cells: I) {
        for (col, ch) in cells.take(self.width).enumerate() {
            grid.set_alive(row, col, ch == self.alive_char);
        }
    }

    /// Parse map text. Never fails; the grid always has the configured size.
    pub fn parse(&self, content: &str) -> Grid {
        let mut grid = Grid::new(self.height, self.width);
        for (row, line) in content.lines().take(self.height).enumerate() {
            self.fill_row(&mut grid, row, line.chars());
        }
        grid
    }

    /// Load a map file, reading until the file ends or the height cap is hit
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Grid, LifeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LifeError::MapNotFound {
                path: path.to_path_buf(),
            },
            _ => LifeError::MapUnreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut grid = Grid::new(self.height, self.width);
        for (row, line) in BufReader::new(file).split(b'\n').take(self.height).enumerate() {
            let mut line = line.map_err(|source| LifeError::MapUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            self.fill_row(&mut grid, row, decode_line(&line).chars());
        }

        info!(path = %path.display(), living = grid.living_count(), "loaded map");
        Ok(grid)
    }

    /// Resolve a map name typed by the user. Names are looked up in the maps
    /// directory first, then treated as a path of their own.
    pub fn resolve<P: AsRef<Path>>(directory: P, name: &str) -> PathBuf {
        let in_directory = directory.as_ref().join(name);
        if in_directory.exists() {
            return in_directory;
        }

        let literal = PathBuf::from(name);
        if literal.exists() {
            debug!(path = %literal.display(), "map resolved outside the maps directory");
            literal
        } else {
            in_directory
        }
    }
}

/// Lines that are not UTF-8 are read one byte per cell as Latin-1
fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(line) => Cow::Borrowed(line),
        Err(_) => Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect()),
    }
}

/// Convert a grid to map text
pub fn grid_to_map_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            result.push(if grid.is_alive(row, col) {
                SAVE_ALIVE_CHAR
            } else {
                SAVE_DEAD_CHAR
            });
        }
        result.push('\n');
    }

    result
}

/// Save a grid as a map file
pub fn save_map<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_map_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write map to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Example maps written by `setup`
pub const EXAMPLE_MAPS: [(&str, &str); 5] = [
    ("glider.txt", ".*...\n..*..\n***..\n.....\n.....\n"),
    ("blinker.txt", ".....\n.....\n.***.\n.....\n.....\n"),
    ("block.txt", "....\n.**.\n.**.\n....\n"),
    ("beacon.txt", "**....\n**....\n..**..\n..**..\n"),
    (
        "acorn.txt",
        "..........\n..*.......\n....*.....\n.**..***..\n..........\n",
    ),
];

/// Create the example map files
pub fn create_example_maps<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, content) in EXAMPLE_MAPS {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
