//! Display and output formatting utilities

use crate::game_of_life::Grid;
use crate::simulation::{SimulationRun, StableSearchOutcome};

/// Text reports about grids and runs
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.width() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..grid.height() {
            output.push_str(&format!("{:2} ", row));
            output.push_str(&grid.row_string(row, "██", "··"));
            output.push('\n');
        }

        output
    }

    /// One-paragraph summary of a run
    pub fn format_run_summary(run: &SimulationRun) -> String {
        let mut output = String::new();
        let initial = run.initial();

        output.push_str(&format!("Grid: {}x{}\n", initial.height(), initial.width()));
        output.push_str(&format!("Generations: {}\n", run.generation_count()));
        output.push_str(&format!("Outcome: {}\n", run.outcome()));
        output.push_str(&format!(
            "Living Cells: {} → {}\n",
            initial.living_count(),
            run.final_generation().living_count()
        ));

        output
    }

    pub fn format_search(outcome: &StableSearchOutcome) -> String {
        match outcome {
            StableSearchOutcome::Found { run, attempts } => format!(
                "Random Stable Map with {} generations (attempt {})",
                run.generation_count(),
                attempts
            ),
            StableSearchOutcome::Exhausted { last_run, attempts } => format!(
                "No stable map after {} attempts, keeping the last one with {} generations",
                attempts,
                last_run.generation_count()
            ),
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationRunner;

    fn sample_grid() -> Grid {
        Grid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let grid = sample_grid();

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_run_summary() {
        let run = SimulationRunner::new(500).run(sample_grid());
        let summary = GridFormatter::format_run_summary(&run);

        assert!(summary.contains("Grid: 3x3"));
        assert!(summary.contains(&format!("Generations: {}", run.generation_count())));
        assert!(summary.contains("Outcome: "));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
