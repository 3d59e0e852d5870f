use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use mexican_train::game::{GameConfig, RoundOutcome};
use mexican_train::simulation::{aggregate_results, run_game, GameResult};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mexican-train")]
#[command(about = "Mexican Train dominoes rules engine and simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// JSON file with game settings; overrides --players and --rounds
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Clone)]
struct GameArgs {
    /// Total seats, including the human seat
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Rounds in a quick game; leave out for a traditional 13-round game
    #[arg(short, long)]
    rounds: Option<u32>,
}

impl Default for GameArgs {
    fn default() -> Self {
        GameArgs {
            players: 4,
            rounds: None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game on autopilot and print every round (default)
    Run {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Play many games in parallel and report statistics
    Simulate {
        #[command(flatten)]
        game: GameArgs,

        /// Number of games to simulate
        #[arg(short, long, default_value = "1000")]
        num_games: usize,

        /// Write the report as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let game_args = match &cli.command {
        Some(Commands::Run { game }) | Some(Commands::Simulate { game, .. }) => game.clone(),
        None => GameArgs::default(),
    };
    let config = match load_config(cli.config.as_deref(), &game_args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let seed = cli.seed.unwrap_or_else(rand::random::<u64>);

    match cli.command {
        Some(Commands::Simulate {
            num_games, output, ..
        }) => simulate(&config, seed, num_games, output.as_deref()),
        Some(Commands::Run { .. }) | None => run_single(&config, seed),
    }
}

fn load_config(path: Option<&str>, args: &GameArgs) -> Result<GameConfig, String> {
    let config = match path {
        Some(path) => GameConfig::from_file(path)
            .map_err(|e| format!("Failed to load config '{}': {}", path, e))?,
        None => match args.rounds {
            Some(rounds) => GameConfig::quick(args.players, rounds),
            None => GameConfig::traditional(args.players),
        },
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run_single(config: &GameConfig, seed: u64) {
    println!("\n=== Mexican Train ===\n");
    println!("Players: {}", config.player_count);
    println!("Mode: {:?}", config.mode);
    println!("Seed: {}", seed);
    println!();

    let result = match run_game(config, seed) {
        Ok(result) => result,
        Err(e) => {
            error!("Game aborted: {}", e);
            std::process::exit(1);
        }
    };
    print_game(&result);
}

fn print_game(result: &GameResult) {
    let mut names = vec![""; result.standings.standings.len()];
    for standing in &result.standings.standings {
        names[standing.seat] = standing.name.as_str();
    }

    for round in &result.rounds {
        let headline = match round.outcome {
            RoundOutcome::Won { player } => format!("{} won the round!", names[player]),
            RoundOutcome::Blocked => "The round is blocked!".to_string(),
        };
        println!("{} (engine double-{}): {}", round.label, round.engine_value, headline);
        for (seat, name) in names.iter().enumerate() {
            println!(
                "  {:12} +{:3} (Total: {})",
                name, round.deltas[seat], round.cumulative[seat]
            );
        }
    }

    println!("\n=== Final Scores ===\n");
    for (place, standing) in result.standings.standings.iter().enumerate() {
        println!("  {}. {:12} {} points", place + 1, standing.name, standing.score);
    }
    if let Some(winner) = result.standings.winner() {
        println!("\nGame Over! {} wins!", winner.name);
    }
}

fn simulate(config: &GameConfig, base_seed: u64, num_games: usize, output: Option<&str>) {
    println!("\n=== Mexican Train Simulator ===\n");
    println!("Players: {}", config.player_count);
    println!("Mode: {:?}", config.mode);
    println!("Games: {}", num_games);
    println!("Base seed: {}", base_seed);
    println!();

    let progress = ProgressBar::new(num_games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = std::time::Instant::now();
    let results: Result<Vec<GameResult>, _> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let result = run_game(config, base_seed.wrapping_add(i as u64));
            progress.inc(1);
            result
        })
        .collect();
    progress.finish_and_clear();
    let elapsed = start.elapsed();

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            error!("Simulation aborted: {}", e);
            std::process::exit(1);
        }
    };
    let report = aggregate_results(config, &results);

    println!("=== Results ===\n");
    for seat in &report.seats {
        println!(
            "  {:12} wins {:5.1}% ({:5})  avg score {:6.1}  rounds won {}",
            seat.name,
            seat.win_rate * 100.0,
            seat.wins,
            seat.avg_score,
            seat.rounds_won
        );
    }
    println!();
    println!(
        "Blocked rounds: {:.1}% ({}/{})",
        report.blocked_rate * 100.0,
        report.blocked_rounds,
        report.rounds
    );
    println!();
    println!(
        "Simulation completed in {:.2?} ({:.0} games/sec)",
        elapsed,
        num_games as f64 / elapsed.as_secs_f64()
    );

    if let Some(path) = output {
        let written = serde_json::to_string_pretty(&report)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => info!(path, "report written"),
            Err(e) => {
                error!("Failed to write report '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }
}
