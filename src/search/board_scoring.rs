//! Material evaluation used by the opponent engines.
//!
//! Scores are always from White's point of view: White material counts
//! positive, Black material negative. Kings are worth nothing because both
//! sides always have exactly one.

use shakmaty::{Board, Chess, Color, Position, Square};

use crate::game_state::chess_types::{PieceType, Side};

pub trait BoardScorer: Send + Sync {
    /// Score from White's perspective.
    fn score(&self, position: &Chess) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceType) -> i32 {
        match piece {
            PieceType::Pawn => 100,
            PieceType::Knight => 300,
            PieceType::Bishop => 300,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 0,
        }
    }

    /// Signed material sum over every square of `board`.
    pub fn material_balance(board: &Board) -> i32 {
        Square::ALL
            .into_iter()
            .filter_map(|square| board.piece_at(square))
            .map(|piece| {
                let value = Self::piece_value(piece.role.into());
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Chess) -> i32 {
        Self::material_balance(position.board())
    }
}

/// True when `candidate` is strictly better than `incumbent` for `mover`.
#[inline]
pub fn strictly_better_for(mover: Side, candidate: i32, incumbent: i32) -> bool {
    match mover {
        Side::White => candidate > incumbent,
        Side::Black => candidate < incumbent,
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::fen::Fen;
    use shakmaty::{CastlingMode, Chess};

    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("FEN should parse")
            .into_position(CastlingMode::Standard)
            .expect("legal position")
    }

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(MaterialScorer.score(&position(STARTING_POSITION_FEN)), 0);
    }

    #[test]
    fn score_is_from_white_perspective() {
        // White: queen + pawn, Black: rook + knight.
        let pos = position("3rk1n1/8/8/8/8/8/4P3/3QK3 w - - 0 1");
        assert_eq!(MaterialScorer.score(&pos), 900 + 100 - 500 - 300);
    }

    #[test]
    fn kings_are_worth_nothing() {
        assert_eq!(MaterialScorer.score(&position("4k3/8/8/8/8/8/8/4K3 w - - 0 1")), 0);
    }

    #[test]
    fn direction_depends_on_mover() {
        assert!(strictly_better_for(Side::White, 200, 100));
        assert!(!strictly_better_for(Side::White, 100, 100));
        assert!(strictly_better_for(Side::Black, -200, -100));
        assert!(!strictly_better_for(Side::Black, -100, -100));
    }
}
