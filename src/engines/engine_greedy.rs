//! One-ply greedy material opponent.
//!
//! Starts from a random move of the forced type, then walks every candidate
//! in canonical order and keeps one only if the material balance after it is
//! strictly better for the mover. Ties keep the earlier pick, so without a
//! material swing the random baseline stands.

use shakmaty::{Chess, Position};
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::{PieceType, Side};
use crate::moves::forced_move::ForcedMove;
use crate::moves::move_ordering::ordered_moves_of_type;
use crate::rng::seeded_rng::SeededRng;
use crate::search::board_scoring::{strictly_better_for, BoardScorer, MaterialScorer};

pub struct GreedyMaterialEngine<S: BoardScorer = MaterialScorer> {
    scorer: S,
}

impl GreedyMaterialEngine {
    pub fn new() -> Self {
        Self {
            scorer: MaterialScorer,
        }
    }
}

impl<S: BoardScorer> GreedyMaterialEngine<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    fn score_after(&self, position: &Chess, mv: &ForcedMove) -> i32 {
        let mut probe = position.clone();
        probe.play_unchecked(mv.raw());
        self.scorer.score(&probe)
    }

    /// Returns the chosen move and its resulting score.
    fn search(
        &self,
        position: &Chess,
        forced_type: PieceType,
        rng: &mut SeededRng,
    ) -> Option<(ForcedMove, i32)> {
        let candidates = ordered_moves_of_type(position, forced_type);
        if candidates.is_empty() {
            return None;
        }

        let mover = Side::from(position.turn());
        let mut best = rng.choice(&candidates);
        let mut best_score = self.score_after(position, best);

        for mv in &candidates {
            let score = self.score_after(position, mv);
            if strictly_better_for(mover, score, best_score) {
                best = mv;
                best_score = score;
            }
        }

        Some((best.clone(), best_score))
    }
}

impl Default for GreedyMaterialEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> Engine for GreedyMaterialEngine<S> {
    fn name(&self) -> &str {
        "ChillChess Greedy"
    }

    fn choose_move(
        &mut self,
        position: &Chess,
        forced_type: Option<PieceType>,
        rng: &mut SeededRng,
    ) -> EngineOutput {
        let mut out = EngineOutput::default();
        let Some(forced_type) = forced_type else {
            out.info_lines
                .push("greedy_engine no_forced_type".to_owned());
            return out;
        };

        if let Some((mv, score)) = self.search(position, forced_type, rng) {
            debug!(forced = %forced_type, san = %mv, score, "greedy engine picked move");
            out.info_lines.push(format!(
                "greedy_engine forced {forced_type} material_score {score}"
            ));
            out.best_move = Some(mv);
        }
        out
    }
}

/// Greedy pick for `position` restricted to `forced_type`.
///
/// Returns `None` iff the side to move has no legal move of that type (or
/// `forced_type` is `None`). Draws exactly one value from `rng` otherwise.
pub fn pick_engine_move(
    position: &Chess,
    forced_type: Option<PieceType>,
    rng: &mut SeededRng,
) -> Option<ForcedMove> {
    GreedyMaterialEngine::new()
        .choose_move(position, forced_type, rng)
        .best_move
}
