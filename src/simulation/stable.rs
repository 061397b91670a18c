//! Search for random worlds that settle into a fixed point

use super::runner::{SimulationRun, SimulationRunner};
use crate::game_of_life::RandomSeeder;
use rand::Rng;
use tracing::{debug, info, warn};

/// Result of a bounded search for a stabilizing random world
#[derive(Debug, Clone)]
pub enum StableSearchOutcome {
    Found { run: SimulationRun, attempts: usize },
    /// Every attempt hit the iteration cap; `last_run` is the final attempt
    Exhausted { last_run: SimulationRun, attempts: usize },
}

impl StableSearchOutcome {
    pub fn run(&self) -> &SimulationRun {
        match self {
            StableSearchOutcome::Found { run, .. } => run,
            StableSearchOutcome::Exhausted { last_run, .. } => last_run,
        }
    }

    pub fn into_run(self) -> SimulationRun {
        match self {
            StableSearchOutcome::Found { run, .. } => run,
            StableSearchOutcome::Exhausted { last_run, .. } => last_run,
        }
    }

    pub fn attempts(&self) -> usize {
        match self {
            StableSearchOutcome::Found { attempts, .. }
            | StableSearchOutcome::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, StableSearchOutcome::Found { .. })
    }
}

/// Reseeds and simulates until a world stabilizes within the runner's cap
#[derive(Debug, Clone)]
pub struct StableWorldSearch {
    seeder: RandomSeeder,
    runner: SimulationRunner,
    max_attempts: usize,
}

impl StableWorldSearch {
    /// `max_attempts` below one is treated as one
    pub fn new(seeder: RandomSeeder, runner: SimulationRunner, max_attempts: usize) -> Self {
        Self {
            seeder,
            runner,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn search<R: Rng + ?Sized>(&self, rng: &mut R) -> StableSearchOutcome {
        let mut attempt = 1;
        loop {
            let run = self.runner.run(self.seeder.seed(rng));

            if run.is_stable() {
                info!(
                    attempts = attempt,
                    generations = run.generation_count(),
                    "found a stable world"
                );
                return StableSearchOutcome::Found {
                    run,
                    attempts: attempt,
                };
            }

            if attempt == self.max_attempts {
                warn!(attempts = attempt, "no stable world within the attempt limit");
                return StableSearchOutcome::Exhausted {
                    last_run: run,
                    attempts: attempt,
                };
            }

            debug!(attempt, "world did not stabilize, reseeding");
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_worlds_are_found_at_once() {
        let search = StableWorldSearch::new(
            RandomSeeder::new(8, 8, 0.0),
            SimulationRunner::new(10),
            5,
        );
        let outcome = search.search(&mut StdRng::seed_from_u64(3));

        assert!(outcome.is_found());
        assert_eq!(outcome.attempts(), 1);
        assert!(outcome.run().is_stable());
    }

    #[test]
    fn test_exhausts_when_cap_is_zero() {
        // With no iterations allowed no world can be shown to stabilize
        let search = StableWorldSearch::new(
            RandomSeeder::new(8, 8, 0.5),
            SimulationRunner::new(0),
            4,
        );
        let outcome = search.search(&mut StdRng::seed_from_u64(3));

        assert!(!outcome.is_found());
        assert_eq!(outcome.attempts(), 4);
        assert_eq!(outcome.into_run().generation_count(), 1);
    }

    #[test]
    fn test_attempt_limit_is_at_least_one() {
        let search = StableWorldSearch::new(
            RandomSeeder::new(4, 4, 0.5),
            SimulationRunner::new(0),
            0,
        );
        assert_eq!(search.search(&mut StdRng::seed_from_u64(1)).attempts(), 1);
    }

    #[test]
    fn test_found_runs_end_in_fixed_point() {
        let search = StableWorldSearch::new(
            RandomSeeder::new(12, 12, 0.5),
            SimulationRunner::new(500),
            50,
        );
        let outcome = search.search(&mut StdRng::seed_from_u64(2024));

        if let StableSearchOutcome::Found { run, .. } = outcome {
            let last = run.final_generation();
            assert_eq!(&crate::game_of_life::GameOfLifeRules::advance(last), last);
        }
    }
}
