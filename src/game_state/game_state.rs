//! The forced-piece-type game aggregate.
//!
//! `Game` owns one `shakmaty` position and one seeded RNG stream. After
//! construction and after every applied move it rolls the forced type for the
//! side to move, so `forced_type` is `None` exactly when that side has no
//! legal move. Status is derived from the position on demand.

use std::collections::HashMap;

use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position, Square};
use tracing::{debug, info, warn};

use crate::engines::engine_greedy::GreedyMaterialEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::{ChillChessError, ChillResult};
use crate::game_state::chess_rules::{derive_status, PROMOTION_CHOICES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::{PieceType, Side, Status};
use crate::moves::forced_move::ForcedMove;
use crate::moves::move_ordering::{distinct_piece_types, ordered_legal_moves, ordered_moves_of_type};
use crate::rng::seeded_rng::{Seed, SeededRng};

/// A move as it entered the game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    pub side: Side,
    pub forced_type: PieceType,
    #[serde(rename = "move")]
    pub mv: ForcedMove,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub seed: Seed,
    pub fen: String,
    pub turn: Side,
    pub forced_type: Option<PieceType>,
    pub status: Status,
    pub forced_moves: Vec<ForcedMove>,
    pub history: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Game {
    seed: Seed,
    rng: SeededRng,
    position: Chess,
    initial_fen: String,
    forced_type: Option<PieceType>,
    history: Vec<PlayedMove>,
    // Zobrist keys cover placement, turn, castling and legal en passant.
    position_counts: HashMap<Zobrist64, usize>,
}

impl Game {
    /// New game from the standard starting position.
    pub fn new(seed: impl Into<Seed>) -> Self {
        Self::from_position(Chess::default(), seed.into())
    }

    /// New game from an arbitrary legal position.
    pub fn from_fen(fen: &str, seed: impl Into<Seed>) -> ChillResult<Self> {
        let invalid = |reason: String| ChillChessError::InvalidFen {
            fen: fen.to_owned(),
            reason,
        };
        let position: Chess = fen
            .trim()
            .parse::<Fen>()
            .map_err(|e| invalid(e.to_string()))?
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self::from_position(position, seed.into()))
    }

    fn from_position(position: Chess, seed: Seed) -> Self {
        let mut game = Self {
            rng: SeededRng::new(&seed),
            seed,
            position,
            initial_fen: String::new(),
            forced_type: None,
            history: Vec::new(),
            position_counts: HashMap::new(),
        };
        game.initial_fen = game.fen();
        game.record_position();
        game.roll_forced_type();
        game
    }

    /// Draw the forced type for the side to move.
    ///
    /// Candidates are the distinct piece types among the legal moves, in
    /// canonical move order. Draws nothing when there are no legal moves.
    pub fn roll_forced_type(&mut self) -> Option<PieceType> {
        let types = distinct_piece_types(&ordered_legal_moves(&self.position));
        self.forced_type = if types.is_empty() {
            None
        } else {
            Some(*self.rng.choice(&types))
        };
        debug!(
            side = %self.turn(),
            candidates = types.len(),
            forced = ?self.forced_type,
            "rolled forced type"
        );
        self.forced_type
    }

    /// Legal moves of the forced type, recomputed from the current position.
    pub fn moves_for_forced_type(&self) -> Vec<ForcedMove> {
        match self.forced_type {
            Some(piece) => ordered_moves_of_type(&self.position, piece),
            None => Vec::new(),
        }
    }

    /// Every legal move of the side to move, ignoring the forced type.
    pub fn legal_moves(&self) -> Vec<ForcedMove> {
        ordered_legal_moves(&self.position)
    }

    /// Apply a move previously returned by [`Game::moves_for_forced_type`].
    pub fn apply_move(&mut self, mv: &ForcedMove) -> ChillResult<Status> {
        self.ensure_playing()?;

        let forced_type = match self.forced_type {
            Some(piece) if mv.piece() == piece && self.moves_for_forced_type().contains(mv) => {
                piece
            }
            _ => {
                warn!(requested = %mv.uci(), forced = ?self.forced_type, "rejected move request");
                return Err(ChillChessError::InvalidMoveRequest {
                    requested: mv.uci(),
                    forced_type: self.forced_type,
                });
            }
        };

        let side = self.turn();
        self.position.play_unchecked(mv.raw());
        self.history.push(PlayedMove {
            side,
            forced_type,
            mv: mv.clone(),
        });
        self.record_position();
        self.roll_forced_type();

        let status = self.status();
        info!(
            %side,
            san = %mv,
            next_forced = ?self.forced_type,
            %status,
            "applied move"
        );
        Ok(status)
    }

    /// Human move by squares.
    ///
    /// A promotion without an explicit piece gets [`Game::random_promotion`].
    /// The promotion argument is ignored for non-promotion moves.
    pub fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> ChillResult<ForcedMove> {
        self.ensure_playing()?;

        let mut candidates: Vec<ForcedMove> = self
            .moves_for_forced_type()
            .into_iter()
            .filter(|m| m.from() == from && m.to() == to)
            .collect();

        let rejected = |game: &Self| {
            let requested = match promotion {
                Some(promo) => format!("{from}{to}{}", promo.code()),
                None => format!("{from}{to}"),
            };
            warn!(%requested, forced = ?game.forced_type, "rejected move request");
            ChillChessError::InvalidMoveRequest {
                requested,
                forced_type: game.forced_type,
            }
        };

        let Some(first) = candidates.first() else {
            return Err(rejected(self));
        };

        let chosen = if first.is_promotion() {
            let promo = match promotion {
                Some(promo) => promo,
                None => self.random_promotion(),
            };
            match candidates.iter().position(|m| m.promotion() == Some(promo)) {
                Some(index) => candidates.swap_remove(index),
                None => return Err(rejected(self)),
            }
        } else {
            candidates.swap_remove(0)
        };

        self.apply_move(&chosen)?;
        Ok(chosen)
    }

    /// Human move in UCI text, e.g. `e2e4` or `a7a8n`.
    pub fn play_uci(&mut self, uci: &str) -> ChillResult<ForcedMove> {
        let parsed: UciMove = uci
            .trim()
            .parse()
            .map_err(|_| ChillChessError::InvalidUci(uci.to_owned()))?;
        match parsed {
            UciMove::Normal {
                from,
                to,
                promotion,
            } => self.attempt_move(from, to, promotion.map(PieceType::from)),
            _ => Err(ChillChessError::InvalidUci(uci.to_owned())),
        }
    }

    /// Let `engine` pick and play a move for the side to move.
    ///
    /// Returns `Ok(None)` once the game is over. If the engine declines while
    /// forced moves exist, the first of them is played.
    pub fn play_engine(&mut self, engine: &mut dyn Engine) -> ChillResult<Option<ForcedMove>> {
        if self.status().is_terminal() {
            return Ok(None);
        }

        let out = engine.choose_move(&self.position, self.forced_type, &mut self.rng);
        for line in &out.info_lines {
            debug!(engine = engine.name(), "{line}");
        }

        let Some(mv) = out
            .best_move
            .or_else(|| self.moves_for_forced_type().into_iter().next())
        else {
            return Ok(None);
        };

        self.apply_move(&mv)?;
        Ok(Some(mv))
    }

    /// Play the greedy material opponent's move.
    pub fn engine_move(&mut self) -> ChillResult<Option<ForcedMove>> {
        self.play_engine(&mut GreedyMaterialEngine::new())
    }

    /// Draw a promotion piece from the game stream.
    pub fn random_promotion(&mut self) -> PieceType {
        *self.rng.choice(&PROMOTION_CHOICES)
    }

    pub fn status(&self) -> Status {
        derive_status(&self.position, self.occurrences_of_current())
    }

    pub fn forced_type(&self) -> Option<PieceType> {
        self.forced_type
    }

    pub fn turn(&self) -> Side {
        self.position.turn().into()
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    pub fn starts_from_standard_position(&self) -> bool {
        self.initial_fen == STARTING_POSITION_FEN
    }

    /// Number of values drawn from the game stream so far.
    pub fn rng_draws(&self) -> u64 {
        self.rng.draws()
    }

    pub fn fen(&self) -> String {
        Fen::from_setup(self.position.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seed: self.seed.clone(),
            fen: self.fen(),
            turn: self.turn(),
            forced_type: self.forced_type,
            status: self.status(),
            forced_moves: self.moves_for_forced_type(),
            history: self.history.iter().map(|p| p.mv.san().to_owned()).collect(),
        }
    }

    fn ensure_playing(&self) -> ChillResult<()> {
        match self.status() {
            Status::Playing => Ok(()),
            status => Err(ChillChessError::GameOver { status }),
        }
    }

    fn repetition_key(&self) -> Zobrist64 {
        self.position.zobrist_hash(EnPassantMode::Legal)
    }

    fn record_position(&mut self) {
        *self.position_counts.entry(self.repetition_key()).or_insert(0) += 1;
    }

    fn occurrences_of_current(&self) -> usize {
        self.position_counts
            .get(&self.repetition_key())
            .copied()
            .unwrap_or(0)
    }
}
