//! Opponent abstraction.
//!
//! Every opponent answers the same question: given a position and the piece
//! type the side to move is forced to use, which move? Randomness always comes
//! from the caller's game stream so that a seed reproduces the opponent's
//! choices as well.

use shakmaty::Chess;

use crate::game_state::chess_types::PieceType;
use crate::moves::forced_move::ForcedMove;
use crate::rng::seeded_rng::SeededRng;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ForcedMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Pick a move of `forced_type` for the side to move in `position`.
    ///
    /// `best_move` is `None` exactly when there is no such move.
    fn choose_move(
        &mut self,
        position: &Chess,
        forced_type: Option<PieceType>,
        rng: &mut SeededRng,
    ) -> EngineOutput;
}
