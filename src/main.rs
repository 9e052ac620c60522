//! Command-line self-play runner.
//!
//! Run with:
//! `cargo run --release -- --seed seed-ChillChess`
//! `cargo run --release -- --random-seed --black random --pgn game.pgn e2e4`

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chill_chess::utils::engine_match_harness::{play_match, EngineKind, MatchConfig};
use chill_chess::utils::pgn::write_pgn;
use chill_chess::Seed;

#[derive(Debug, Parser)]
#[command(name = "chill_chess", about = "Seeded forced-piece-type chess self-play")]
struct Args {
    /// Game seed; text is hashed, so any string works.
    #[arg(long, default_value = "seed-ChillChess", conflicts_with = "random_seed")]
    seed: String,

    /// Use a fresh random seed instead of --seed.
    #[arg(long)]
    random_seed: bool,

    /// Starting position in FEN.
    #[arg(long)]
    fen: Option<String>,

    #[arg(long, value_enum, default_value_t = EngineKind::Greedy)]
    white: EngineKind,

    #[arg(long, value_enum, default_value_t = EngineKind::Greedy)]
    black: EngineKind,

    /// Stop after this many engine plies.
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// Pause before every engine ply, in milliseconds.
    #[arg(long, default_value_t = 0)]
    think_ms: u64,

    /// Write the finished game as PGN to this path.
    #[arg(long)]
    pgn: Option<PathBuf>,

    /// Print the outcome and final game snapshot as JSON.
    #[arg(long)]
    json: bool,

    /// UCI moves to play before the engines take over.
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = if args.random_seed {
        Seed::random()
    } else {
        Seed::from(args.seed)
    };

    let config = MatchConfig {
        seed,
        start_fen: args.fen,
        scripted_moves: args.moves,
        max_plies: args.max_plies,
        white: args.white,
        black: args.black,
        think_delay: Duration::from_millis(args.think_ms),
    };

    let result = play_match(&config).context("self-play failed")?;
    println!("{}", result.report());

    if let Some(path) = &args.pgn {
        fs::write(path, write_pgn(&result.game))
            .with_context(|| format!("failed to write PGN to {}", path.display()))?;
    }

    if args.json {
        let summary = serde_json::json!({
            "white": config.white,
            "black": config.black,
            "outcome": result.outcome,
            "engine_plies": result.engine_plies,
            "snapshot": result.game.snapshot(),
        });
        let text = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{text}");
    }

    Ok(())
}
