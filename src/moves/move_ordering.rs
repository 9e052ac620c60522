//! Canonical ordering of legal moves.
//!
//! The forced type is drawn by indexing into the list of distinct piece types,
//! so that list must not depend on how the rules library happens to enumerate
//! moves. Moves are sorted by from-square in board-scan order (a8..h8, a7..h7,
//! down to a1..h1), then by to-square in the same order, then by promotion
//! piece (none, q, r, b, n). Piece types are collected by first occurrence.

use indexmap::IndexSet;
use shakmaty::{Chess, Position, Square};

use crate::game_state::chess_types::PieceType;
use crate::moves::forced_move::ForcedMove;

/// Position of `square` in an a8-first, rank-by-rank scan.
#[inline]
pub fn scan_index(square: Square) -> u8 {
    (square as u8) ^ 56
}

#[inline]
fn promotion_rank(promotion: Option<PieceType>) -> u8 {
    match promotion {
        None => 0,
        Some(PieceType::Queen) => 1,
        Some(PieceType::Rook) => 2,
        Some(PieceType::Bishop) => 3,
        Some(PieceType::Knight) => 4,
        Some(_) => 5,
    }
}

fn sort_key(mv: &ForcedMove) -> (u8, u8, u8) {
    (
        scan_index(mv.from()),
        scan_index(mv.to()),
        promotion_rank(mv.promotion()),
    )
}

/// All legal moves of the side to move, canonically ordered.
pub fn ordered_legal_moves(position: &Chess) -> Vec<ForcedMove> {
    let mut moves: Vec<ForcedMove> = position
        .legal_moves()
        .into_iter()
        .map(|m| ForcedMove::from_legal(position, m))
        .collect();
    moves.sort_by_key(sort_key);
    moves
}

/// Legal moves of `piece` only, canonically ordered.
pub fn ordered_moves_of_type(position: &Chess, piece: PieceType) -> Vec<ForcedMove> {
    let mut moves = ordered_legal_moves(position);
    moves.retain(|m| m.piece() == piece);
    moves
}

/// Distinct moving piece types in first-occurrence order.
pub fn distinct_piece_types(moves: &[ForcedMove]) -> Vec<PieceType> {
    let types: IndexSet<PieceType> = moves.iter().map(ForcedMove::piece).collect();
    types.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use shakmaty::fen::Fen;
    use shakmaty::{CastlingMode, Chess, Square};

    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("FEN should parse")
            .into_position(CastlingMode::Standard)
            .expect("legal position")
    }

    #[test]
    fn scan_starts_at_a8_and_ends_at_h1() {
        assert_eq!(scan_index(Square::A8), 0);
        assert_eq!(scan_index(Square::H8), 7);
        assert_eq!(scan_index(Square::A7), 8);
        assert_eq!(scan_index(Square::A1), 56);
        assert_eq!(scan_index(Square::H1), 63);
    }

    #[test]
    fn start_position_lists_pawns_before_knights() {
        let moves = ordered_legal_moves(&position(STARTING_POSITION_FEN));
        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0].uci(), "a2a4");
        assert_eq!(moves[1].uci(), "a2a3");
        assert_eq!(moves[16].uci(), "b1a3");
        assert_eq!(
            distinct_piece_types(&moves),
            vec![PieceType::Pawn, PieceType::Knight]
        );
    }

    #[test]
    fn black_types_start_from_the_back_rank() {
        let moves = ordered_legal_moves(&position(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        ));
        assert_eq!(
            distinct_piece_types(&moves),
            vec![PieceType::Knight, PieceType::Pawn]
        );
    }

    #[test]
    fn promotions_are_ordered_queen_first() {
        let moves = ordered_legal_moves(&position("7k/P7/8/8/8/8/8/K7 w - - 0 1"));
        let promos: Vec<String> = moves
            .iter()
            .filter(|m| m.is_promotion())
            .map(|m| m.uci())
            .collect();
        assert_eq!(promos, vec!["a7a8q", "a7a8r", "a7a8b", "a7a8n"]);
    }

    #[test]
    fn type_filter_keeps_only_that_piece() {
        let knights = ordered_moves_of_type(&position(STARTING_POSITION_FEN), PieceType::Knight);
        assert_eq!(knights.len(), 4);
        assert!(knights.iter().all(|m| m.piece() == PieceType::Knight));
        let kings = ordered_moves_of_type(&position(STARTING_POSITION_FEN), PieceType::King);
        assert!(kings.is_empty());
    }
}
