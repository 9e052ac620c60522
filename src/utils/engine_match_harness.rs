//! Seeded self-play between two opponents on one [`Game`].
//!
//! Scripted UCI moves are played first (the human side of a recorded game),
//! then the configured engines alternate until the game ends or the ply limit
//! is reached. The optional think delay only sleeps between plies; it never
//! touches move selection or the RNG stream.

use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::engines::engine_greedy::GreedyMaterialEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::ChillResult;
use crate::game_state::chess_types::{Side, Status};
use crate::game_state::game_state::Game;
use crate::rng::seeded_rng::Seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Greedy,
    Random,
}

impl EngineKind {
    pub fn build(self) -> Box<dyn Engine> {
        match self {
            EngineKind::Greedy => Box::new(GreedyMaterialEngine::new()),
            EngineKind::Random => Box::new(RandomEngine::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    Checkmate { winner: Side },
    Stalemate,
    Draw,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub seed: Seed,
    pub start_fen: Option<String>,
    pub scripted_moves: Vec<String>,
    pub max_plies: u32,
    pub white: EngineKind,
    pub black: EngineKind,
    pub think_delay: Duration,
}

impl MatchConfig {
    pub fn new(seed: impl Into<Seed>) -> Self {
        Self {
            seed: seed.into(),
            start_fen: None,
            scripted_moves: Vec::new(),
            max_plies: 300,
            white: EngineKind::Greedy,
            black: EngineKind::Greedy,
            think_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    /// Engine plies only; scripted moves are not counted.
    pub engine_plies: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
    pub game: Game,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "seed={} outcome={:?} engine_plies={} white_ms={:.3} black_ms={:.3} final_fen=\"{}\"",
            self.game.seed(),
            self.outcome,
            self.engine_plies,
            self.white_total_time_ns as f64 / 1_000_000.0,
            self.black_total_time_ns as f64 / 1_000_000.0,
            self.game.fen()
        )
    }
}

pub fn play_match(config: &MatchConfig) -> ChillResult<MatchResult> {
    let mut game = match &config.start_fen {
        Some(fen) => Game::from_fen(fen, config.seed.clone())?,
        None => Game::new(config.seed.clone()),
    };

    for uci in &config.scripted_moves {
        game.play_uci(uci)?;
    }

    let mut engine_white = config.white.build();
    let mut engine_black = config.black.build();
    let mut engine_plies = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    while engine_plies < config.max_plies && !game.status().is_terminal() {
        if !config.think_delay.is_zero() {
            thread::sleep(config.think_delay);
        }

        let mover = game.turn();
        let engine: &mut dyn Engine = match mover {
            Side::White => engine_white.as_mut(),
            Side::Black => engine_black.as_mut(),
        };

        let started = Instant::now();
        let played = game.play_engine(engine)?;
        let elapsed_ns = started.elapsed().as_nanos();
        match mover {
            Side::White => white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns),
            Side::Black => black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns),
        }

        let Some(mv) = played else {
            break;
        };
        engine_plies += 1;
        debug!(ply = engine_plies, %mover, san = %mv, "engine ply");
    }

    let outcome = match game.status() {
        Status::Checkmate => MatchOutcome::Checkmate {
            winner: game.turn().opposite(),
        },
        Status::Stalemate => MatchOutcome::Stalemate,
        Status::Draw => MatchOutcome::Draw,
        Status::Playing => MatchOutcome::MaxPlies,
    };
    info!(seed = %game.seed(), ?outcome, engine_plies, "match finished");

    Ok(MatchResult {
        outcome,
        engine_plies,
        white_total_time_ns,
        black_total_time_ns,
        game,
    })
}
