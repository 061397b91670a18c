//! Command line entry point for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conways_life::{
    config::{CliOverrides, Settings},
    game_of_life::{create_example_maps, MapLoader},
    menu::{run_menu, Session},
    render::{ConsoleRenderer, Renderer, TerminalRenderer},
    simulation::{SimulationRun, StableSearchOutcome},
    simulate_map,
    utils::{ColorOutput, GridFormatter},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conways_life")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Menu {
        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory map names are looked up in (overrides config)
        #[arg(long)]
        maps_dir: Option<PathBuf>,
    },

    /// Simulate a map file and play it back
    Run {
        /// Map file, either a path or a name inside the maps directory
        #[arg(short, long)]
        map: PathBuf,

        /// Draw full screen instead of printing
        #[arg(long)]
        draw: bool,

        /// Show the loaded map with coordinates before playing it
        #[arg(long)]
        show_initial: bool,

        /// Maximum number of generations (overrides config)
        #[arg(short = 'n', long)]
        max_iterations: Option<usize>,

        /// Delay between frames in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Simulate a random world and play it back
    Random {
        /// Keep reseeding until the world reaches a fixed point
        #[arg(long)]
        stable: bool,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Draw full screen instead of printing
        #[arg(long)]
        draw: bool,

        /// Maximum number of generations (overrides config)
        #[arg(short = 'n', long)]
        max_iterations: Option<usize>,

        /// Delay between frames in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Simulate a map file and write the history as JSON
    Export {
        /// Map file, either a path or a name inside the maps directory
        #[arg(short, long)]
        map: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum number of generations (overrides config)
        #[arg(short = 'n', long)]
        max_iterations: Option<usize>,
    },

    /// Create the default configuration and example maps
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Commands::Menu {
        seed: None,
        maps_dir: None,
    }) {
        Commands::Menu { seed, maps_dir } => {
            let settings = load_settings(
                &cli.config,
                CliOverrides {
                    seed,
                    maps_dir,
                    ..CliOverrides::default()
                },
            )?;
            menu_command(settings)
        }
        Commands::Run {
            map,
            draw,
            show_initial,
            max_iterations,
            delay_ms,
        } => {
            let settings = load_settings(
                &cli.config,
                CliOverrides {
                    max_iterations,
                    delay_ms,
                    ..CliOverrides::default()
                },
            )?;
            run_command(settings, map, draw, show_initial)
        }
        Commands::Random {
            stable,
            seed,
            draw,
            max_iterations,
            delay_ms,
        } => {
            let settings = load_settings(
                &cli.config,
                CliOverrides {
                    max_iterations,
                    seed,
                    delay_ms,
                    ..CliOverrides::default()
                },
            )?;
            random_command(settings, stable, draw)
        }
        Commands::Export {
            map,
            output,
            max_iterations,
        } => {
            let settings = load_settings(
                &cli.config,
                CliOverrides {
                    max_iterations,
                    ..CliOverrides::default()
                },
            )?;
            export_command(settings, map, output)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &Path, overrides: CliOverrides) -> Result<Settings> {
    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn menu_command(settings: Settings) -> Result<()> {
    let mut session = Session::new(settings);
    let stdin = std::io::stdin();
    run_menu(&mut session, stdin.lock(), std::io::stdout()).context("Menu stopped")?;
    Ok(())
}

/// Play a finished run back, then report how it ended
fn play(settings: &Settings, run: &SimulationRun, draw: bool) -> Result<()> {
    if draw {
        TerminalRenderer::stdout(&settings.render).render(run.generations())?;
    } else {
        ConsoleRenderer::stdout(&settings.render).render(run.generations())?;
    }

    println!("{}", ColorOutput::success(&GridFormatter::format_run_summary(run)));
    Ok(())
}

fn run_command(settings: Settings, map: PathBuf, draw: bool, show_initial: bool) -> Result<()> {
    let path = MapLoader::resolve(&settings.maps.directory, &map.to_string_lossy());
    let run = simulate_map(&settings, &path)?;

    if show_initial {
        println!("{}", ColorOutput::info(&format!("Loaded {}:", path.display())));
        println!("{}", GridFormatter::format_grid_with_coords(run.initial()));
    }

    play(&settings, &run, draw)
}

fn random_command(settings: Settings, stable: bool, draw: bool) -> Result<()> {
    let mut rng = match settings.random.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let run = if stable {
        let outcome = settings.stable_search().search(&mut rng);
        let message = GridFormatter::format_search(&outcome);
        match outcome {
            StableSearchOutcome::Found { .. } => println!("{}", ColorOutput::info(&message)),
            StableSearchOutcome::Exhausted { .. } => println!("{}", ColorOutput::warning(&message)),
        }
        outcome.into_run()
    } else {
        settings.runner().run(settings.seeder().seed(&mut rng))
    };

    play(&settings, &run, draw)
}

fn export_command(settings: Settings, map: PathBuf, output: PathBuf) -> Result<()> {
    let path = MapLoader::resolve(&settings.maps.directory, &map.to_string_lossy());
    let run = simulate_map(&settings, &path)?;

    let json = run.to_json().context("Failed to serialize history")?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let message = format!(
        "Wrote {} generations ({}) to {}",
        run.generation_count(),
        run.outcome(),
        output.display()
    );
    println!("{}", ColorOutput::success(&message));
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up config and maps..."));

    let config_dir = directory.join("config");
    let maps_dir = directory.join("maps");

    for dir in [&config_dir, &maps_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_maps(&maps_dir).context("Failed to create example maps")?;
    println!("Created example maps in: {}", maps_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Add your own maps to {}", maps_dir.display());
    println!("3. Run: cargo run -- menu");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "conways_life",
            "run",
            "--map",
            "glider.txt",
            "-n",
            "50",
            "--config",
            "test.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("test.yaml"));
        assert!(matches!(
            cli.command,
            Some(Commands::Run {
                max_iterations: Some(50),
                draw: false,
                ..
            })
        ));
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["conways_life"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config/default.yaml"));
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("maps/glider.txt").exists());
        assert!(Settings::from_file(temp_dir.path().join("config/default.yaml")).is_ok());
    }

    #[test]
    fn test_export_command() {
        let temp_dir = tempdir().unwrap();
        create_example_maps(temp_dir.path()).unwrap();

        let mut settings = Settings::default();
        settings.maps.directory = temp_dir.path().to_path_buf();
        let output = temp_dir.path().join("out/block.json");
        export_command(settings, PathBuf::from("block.txt"), output.clone()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["summary"]["outcome"]["kind"], "stabilized");
        assert_eq!(json["summary"]["generation_count"], 1);
    }
}
