//! Ludo-Sim: an autonomous four-player Ludo simulation.
//!
//! ## Usage
//!
//! - `ludo-sim` - Play one game with a random seed, trace to stdout
//! - `ludo-sim --seed 42` - Replay a specific game
//! - `ludo-sim --output game_output.txt` - Write the trace to a file

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ludo_sim::dice::FastDice;
use ludo_sim::game::{Game, SimConfig};

/// Ludo-Sim: a four-player Ludo race with house rules
#[derive(Parser)]
#[command(name = "ludo-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the game trace to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the status block printed after every round
    #[arg(short, long, default_value_t = false)]
    quiet_status: bool,

    /// Stop after this many rounds even if nobody has won
    #[arg(long)]
    max_rounds: Option<u32>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialize_logging(cli.log_level);

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    info!(seed);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if let Err(err) = writeln!(out, "LUDO-CS Game Simulation\n") {
        warn!(%err, "failed to write trace");
    }

    let config = SimConfig {
        print_status: !cli.quiet_status,
    };
    let mut game = Game::with_config(FastDice::with_seed(seed), config);
    let result = match cli.max_rounds {
        Some(max_rounds) => game.run_rounds(&mut out, max_rounds),
        None => game.run(&mut out).map(Some),
    };

    if let Err(err) = out.flush() {
        warn!(%err, "failed to flush trace");
    }

    match result.with_context(|| format!("simulation aborted (seed {seed})"))? {
        Some(winner) => info!(%winner, "finished"),
        None => info!("round limit reached without a winner"),
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
