//! Uniform random opponent.
//!
//! Picks any move of the forced type through the game's own RNG. Used for
//! diagnostics and as the weakest self-play opponent.

use shakmaty::Chess;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::PieceType;
use crate::moves::move_ordering::ordered_moves_of_type;
use crate::rng::seeded_rng::SeededRng;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "ChillChess Random"
    }

    fn choose_move(
        &mut self,
        position: &Chess,
        forced_type: Option<PieceType>,
        rng: &mut SeededRng,
    ) -> EngineOutput {
        let mut out = EngineOutput::default();
        let Some(forced_type) = forced_type else {
            return out;
        };

        let candidates = ordered_moves_of_type(position, forced_type);
        out.info_lines.push(format!(
            "random_engine forced {forced_type} candidates {}",
            candidates.len()
        ));
        if candidates.is_empty() {
            return out;
        }

        let picked = rng.choice(&candidates).clone();
        debug!(forced = %forced_type, san = %picked, "random engine picked move");
        out.best_move = Some(picked);
        out
    }
}
