//! Runs a world forward until it reaches a fixed point or the iteration cap

use crate::game_of_life::{GameOfLifeRules, Grid};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Why a simulation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationOutcome {
    /// Generation `generation` maps onto itself. It is the last grid in the
    /// sequence and appears there exactly once.
    Stabilized { generation: usize },
    /// The rules were applied `iterations` times without reaching a fixed point
    ReachedCap { iterations: usize },
}

impl fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationOutcome::Stabilized { generation } => {
                write!(f, "stabilized after {} generations", generation)
            }
            SimulationOutcome::ReachedCap { iterations } => {
                write!(f, "reached the cap of {} generations", iterations)
            }
        }
    }
}

/// The generations produced by one run, index 0 being the initial grid
#[derive(Debug, Clone)]
pub struct SimulationRun {
    generations: Vec<Grid>,
    outcome: SimulationOutcome,
}

/// Serializable overview of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub height: usize,
    pub width: usize,
    pub outcome: SimulationOutcome,
    pub generation_count: usize,
    pub living_counts: Vec<usize>,
}

#[derive(Serialize)]
struct RunHistory {
    summary: RunSummary,
    generations: Vec<Vec<String>>,
}

impl SimulationRun {
    pub fn generations(&self) -> &[Grid] {
        &self.generations
    }

    pub fn outcome(&self) -> SimulationOutcome {
        self.outcome
    }

    /// Number of grids in the sequence, including the initial one
    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    pub fn is_stable(&self) -> bool {
        matches!(self.outcome, SimulationOutcome::Stabilized { .. })
    }

    pub fn initial(&self) -> &Grid {
        &self.generations[0]
    }

    pub fn final_generation(&self) -> &Grid {
        // A run always holds at least the initial grid
        &self.generations[self.generations.len() - 1]
    }

    pub fn summary(&self) -> RunSummary {
        let initial = self.initial();
        RunSummary {
            height: initial.height(),
            width: initial.width(),
            outcome: self.outcome,
            generation_count: self.generation_count(),
            living_counts: self.generations.iter().map(Grid::living_count).collect(),
        }
    }

    /// Summary plus every generation as `*`/`.` rows
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let history = RunHistory {
            summary: self.summary(),
            generations: self
                .generations
                .iter()
                .map(|grid| grid.to_string().lines().map(str::to_owned).collect())
                .collect(),
        };
        serde_json::to_string_pretty(&history)
    }
}

/// Drives repeated generation advances
#[derive(Debug, Clone, Copy)]
pub struct SimulationRunner {
    max_iterations: usize,
}

impl SimulationRunner {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Simulate from `initial`. Only exact fixed points stop the run early;
    /// oscillators with a longer period run until the cap.
    pub fn run(&self, initial: Grid) -> SimulationRun {
        let mut generations = vec![initial];

        for _ in 0..self.max_iterations {
            let current = &generations[generations.len() - 1];
            let next = GameOfLifeRules::advance(current);

            if next == *current {
                let generation = generations.len() - 1;
                debug!(generation, "simulation reached a fixed point");
                return SimulationRun {
                    generations,
                    outcome: SimulationOutcome::Stabilized { generation },
                };
            }

            generations.push(next);
        }

        debug!(iterations = self.max_iterations, "simulation reached the iteration cap");
        SimulationRun {
            generations,
            outcome: SimulationOutcome::ReachedCap {
                iterations: self.max_iterations,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use proptest::prelude::*;

    fn grid_with(height: usize, width: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(height, width);
        for &(row, col) in alive {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_block_is_stable_immediately() {
        let block = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let run = SimulationRunner::new(500).run(block.clone());

        assert_eq!(run.outcome(), SimulationOutcome::Stabilized { generation: 0 });
        assert_eq!(run.generation_count(), 1);
        assert_eq!(run.final_generation(), &block);
        assert!(run.is_stable());
    }

    #[test]
    fn test_isolated_cell_stabilizes_empty() {
        let run = SimulationRunner::new(500).run(grid_with(5, 5, &[(2, 2)]));

        assert_eq!(run.outcome(), SimulationOutcome::Stabilized { generation: 1 });
        assert_eq!(run.generation_count(), 2);
        assert!(run.final_generation().is_empty());
    }

    #[test]
    fn test_blinker_runs_to_cap() {
        let blinker = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let run = SimulationRunner::new(20).run(blinker.clone());

        assert_eq!(run.outcome(), SimulationOutcome::ReachedCap { iterations: 20 });
        assert_eq!(run.generation_count(), 21);
        assert!(!run.is_stable());

        // Period two: every even generation is the starting phase
        for (i, grid) in run.generations().iter().enumerate() {
            assert_eq!(grid == &blinker, i % 2 == 0);
        }
    }

    #[test]
    fn test_no_duplicate_generations() {
        // A pre-block settles into a block after one step
        let pre_block = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1)]);
        let run = SimulationRunner::new(500).run(pre_block);

        assert_eq!(run.outcome(), SimulationOutcome::Stabilized { generation: 1 });
        assert!(run
            .generations()
            .iter()
            .tuple_windows()
            .all(|(a, b)| a != b));
    }

    #[test]
    fn test_zero_iterations() {
        let run = SimulationRunner::new(0).run(grid_with(3, 3, &[(1, 1)]));
        assert_eq!(run.generation_count(), 1);
        assert_eq!(run.outcome(), SimulationOutcome::ReachedCap { iterations: 0 });
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            SimulationOutcome::Stabilized { generation: 12 }.to_string(),
            "stabilized after 12 generations"
        );
        assert_eq!(
            SimulationOutcome::ReachedCap { iterations: 500 }.to_string(),
            "reached the cap of 500 generations"
        );
    }

    #[test]
    fn test_summary_and_json() {
        let run = SimulationRunner::new(10).run(grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]));
        let summary = run.summary();
        assert_eq!(summary.generation_count, 11);
        assert_eq!(summary.living_counts, vec![3; 11]);

        let json: serde_json::Value = serde_json::from_str(&run.to_json().unwrap()).unwrap();
        assert_eq!(json["summary"]["outcome"]["kind"], "reached_cap");
        assert_eq!(json["generations"][0][1], "***");
        assert_eq!(json["generations"][1][0], ".*.");
    }

    proptest! {
        #[test]
        fn run_length_is_bounded(
            cells in proptest::collection::vec(any::<bool>(), 64),
            max_iterations in 0usize..30
        ) {
            let rows: Vec<Vec<bool>> = cells.chunks(8).map(<[bool]>::to_vec).collect();
            let grid = Grid::from_rows(rows).unwrap();
            let run = SimulationRunner::new(max_iterations).run(grid.clone());

            prop_assert!(run.generation_count() <= max_iterations + 1);
            prop_assert_eq!(run.initial(), &grid);
            if let SimulationOutcome::Stabilized { generation } = run.outcome() {
                prop_assert_eq!(generation + 1, run.generation_count());
                prop_assert!(GameOfLifeRules::is_fixed_point(run.final_generation()));
            }
        }
    }
}
