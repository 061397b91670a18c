//! Interactive session state and the menu loop

use super::MenuOption;
use crate::config::Settings;
use crate::error::LifeError;
use crate::game_of_life::{Grid, MapLoader};
use crate::render::{ConsoleRenderer, Renderer, TerminalRenderer};
use crate::simulation::{SimulationRun, StableSearchOutcome};
use crate::utils::{ColorOutput, GridFormatter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// The currently selected world: where it came from and its simulated history
#[derive(Debug, Clone)]
pub struct World {
    pub label: String,
    pub run: SimulationRun,
}

pub struct Session {
    settings: Settings,
    rng: StdRng,
    world: Option<World>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let rng = match settings.random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            rng,
            world: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    fn select(&mut self, label: String, run: SimulationRun) -> &World {
        info!(
            %label,
            generations = run.generation_count(),
            outcome = %run.outcome(),
            "world selected"
        );
        self.world.insert(World { label, run })
    }

    /// Simulate an already built grid and select it
    pub fn select_grid(&mut self, label: String, grid: Grid) -> &World {
        let run = self.settings.runner().run(grid);
        self.select(label, run)
    }

    /// Load a map by name and simulate it. On failure the current world is kept.
    pub fn load_map(&mut self, name: &str) -> Result<&World, LifeError> {
        let path = MapLoader::resolve(&self.settings.maps.directory, name);
        let grid = self.settings.map_loader().load(&path)?;
        Ok(self.select_grid(path.display().to_string(), grid))
    }

    pub fn generate_random(&mut self) -> &World {
        let grid = self.settings.seeder().seed(&mut self.rng);
        let run = self.settings.runner().run(grid);
        let label = format!("Random Map with {} generations", run.generation_count());
        self.select(label, run)
    }

    /// Search for a random world that stabilizes. An exhausted search still
    /// selects its last attempt.
    pub fn generate_random_stable(&mut self) -> StableSearchOutcome {
        let outcome = self.settings.stable_search().search(&mut self.rng);
        let label = GridFormatter::format_search(&outcome);
        self.select(label, outcome.run().clone());
        outcome
    }

    /// Generations of the selected world
    pub fn generations(&self) -> Result<&[Grid], LifeError> {
        self.world
            .as_ref()
            .map(|world| world.run.generations())
            .ok_or(LifeError::NoWorld)
    }

    pub fn render_with(&self, renderer: &mut dyn Renderer) -> anyhow::Result<()> {
        renderer.render(self.generations()?)
    }
}

fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    for option in MenuOption::ALL {
        writeln!(out, "{}", option)?;
    }
    writeln!(out)
}

/// Print a prompt and read one line. `None` means the input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> std::io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Tell the user about a failed action. Unrecoverable errors are passed up.
fn report<W: Write>(out: &mut W, err: LifeError) -> Result<(), LifeError> {
    if !err.is_recoverable() {
        return Err(err);
    }
    warn!(error = %err, "menu action failed");
    writeln!(
        out,
        "{}",
        ColorOutput::error(&format!("Something went wrong. Please try again.\nDetails: {}", err))
    )?;
    Ok(())
}

/// Play the selected world back on `out`, either scrolling or full screen
fn play<W: Write>(session: &Session, out: &mut W, full_screen: bool) -> Result<(), LifeError> {
    let generations = match session.generations() {
        Ok(generations) => generations,
        Err(err) => return report(out, err),
    };

    let config = &session.settings().render;
    let rendered = if full_screen {
        TerminalRenderer::new(&mut *out, config).render(generations)
    } else {
        ConsoleRenderer::new(&mut *out, config).render(generations)
    };

    if let Err(err) = rendered {
        warn!(error = %err, "rendering failed");
        writeln!(out, "{}", ColorOutput::error(&format!("{:#}", err)))?;
    }
    Ok(())
}

/// Run the interactive menu until the user exits or the input ends
pub fn run_menu<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut out: W,
) -> Result<(), LifeError> {
    writeln!(out)?;
    writeln!(out, "Conway's Game of Life")?;

    loop {
        if let Some(world) = session.world() {
            writeln!(out)?;
            writeln!(out, "Map '{}' selected", world.label)?;
        }
        print_menu(&mut out)?;

        let Some(line) = prompt(&mut input, &mut out, "[option]> ")? else {
            return Ok(());
        };
        let Ok(option) = line.parse::<MenuOption>() else {
            writeln!(out, "Not an option.")?;
            continue;
        };

        match option {
            MenuOption::Load => {
                let Some(name) = prompt(&mut input, &mut out, "[map]> ")? else {
                    return Ok(());
                };
                if let Err(err) = session.load_map(&name) {
                    report(&mut out, err)?;
                }
            }
            MenuOption::RandomStable => {
                let outcome = session.generate_random_stable();
                if !outcome.is_found() {
                    let message = GridFormatter::format_search(&outcome);
                    writeln!(out, "{}", ColorOutput::warning(&message))?;
                }
            }
            MenuOption::Random => {
                session.generate_random();
            }
            MenuOption::Print => play(session, &mut out, false)?,
            MenuOption::Draw => play(session, &mut out, true)?,
            MenuOption::Exit => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::create_example_maps;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    fn session_with_maps() -> (Session, TempDir) {
        let temp_dir = tempdir().unwrap();
        create_example_maps(temp_dir.path()).unwrap();

        let mut settings = Settings::default();
        settings.grid.height = 8;
        settings.grid.width = 8;
        settings.simulation.max_iterations = 20;
        settings.simulation.stable_attempts = 5;
        settings.maps.directory = temp_dir.path().to_path_buf();
        settings.random.seed = Some(11);
        settings.render.frame_delay_ms = 0;
        settings.render.alive_glyph = "#".to_string();
        settings.render.dead_glyph = ".".to_string();

        (Session::new(settings), temp_dir)
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run_menu(session, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_load_map_selects_world() {
        let (mut session, _dir) = session_with_maps();
        let world = session.load_map("block.txt").unwrap();

        assert!(world.label.ends_with("block.txt"));
        assert!(world.run.is_stable());
        assert_eq!(world.run.generation_count(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_world() {
        let (mut session, _dir) = session_with_maps();
        session.load_map("blinker.txt").unwrap();
        let before = session.generations().unwrap().to_vec();

        let err = session.load_map("missing.txt").unwrap_err();
        assert!(matches!(err, LifeError::MapNotFound { .. }));
        assert_eq!(session.generations().unwrap(), before.as_slice());
        assert!(session.world().unwrap().label.ends_with("blinker.txt"));
    }

    #[test]
    fn test_no_world_before_selection() {
        let (session, _dir) = session_with_maps();
        assert!(matches!(session.generations(), Err(LifeError::NoWorld)));
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let (mut first, _dir_a) = session_with_maps();
        let (mut second, _dir_b) = session_with_maps();

        let a = first.generate_random().run.initial().clone();
        let b = second.generate_random().run.initial().clone();
        assert_eq!(a, b);
        assert!(first.world().unwrap().label.starts_with("Random Map with"));
    }

    #[test]
    fn test_stable_search_always_selects_a_world() {
        let (mut session, _dir) = session_with_maps();
        let outcome = session.generate_random_stable();

        assert!(outcome.attempts() <= 5);
        assert_eq!(
            session.world().unwrap().run.generation_count(),
            outcome.run().generation_count()
        );
    }

    #[test]
    fn test_menu_load_and_print() {
        let (mut session, _dir) = session_with_maps();
        let output = run_script(&mut session, "1\nblock.txt\n8\n0\n");

        assert!(output.contains("Conway's Game of Life"));
        assert!(output.contains("[map]> "));
        assert!(output.contains("block.txt' selected"));
        assert!(output.contains(".##.....\n.##.....\n"));
        assert_eq!(output.matches(" --- ").count(), 1);
    }

    #[test]
    fn test_menu_reports_bad_input_and_missing_maps() {
        let (mut session, _dir) = session_with_maps();
        let output = run_script(&mut session, "7\n1\nnope.txt\n8\n");

        assert!(output.contains("Not an option."));
        assert!(output.contains("Details: map file does not exist"));
        assert!(output.contains("no world selected"));
        assert!(!output.contains("Map '"));
    }

    #[test]
    fn test_menu_draw_uses_alternate_screen() {
        let (mut session, _dir) = session_with_maps();
        let output = run_script(&mut session, "3\n9\n0\n");

        assert!(output.contains("Random Map with"));
        assert!(output.contains("\x1b[?1049h"));
        assert!(output.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_menu_ends_with_input() {
        let (mut session, _dir) = session_with_maps();
        let output = run_script(&mut session, "");
        assert!(output.ends_with("[option]> "));
    }
}
