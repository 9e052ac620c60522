//! Canonical rule constants and status derivation.
//!
//! Legality itself belongs to `shakmaty`; this module only pins the variant's
//! literals and classifies a position into a [`Status`].

use shakmaty::{Chess, Position};

use crate::game_state::chess_types::{PieceType, Status};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Candidate list for randomized promotions, in draw order.
pub const PROMOTION_CHOICES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// Halfmove clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that draw by repetition.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// Classify `position`, given how many times it has occurred in the game.
///
/// Precedence is checkmate, stalemate, draw, playing.
pub fn derive_status(position: &Chess, occurrences: usize) -> Status {
    if position.is_checkmate() {
        Status::Checkmate
    } else if position.is_stalemate() {
        Status::Stalemate
    } else if position.halfmoves() >= FIFTY_MOVE_HALFMOVES
        || position.is_insufficient_material()
        || occurrences >= REPETITION_DRAW_COUNT
    {
        Status::Draw
    } else {
        Status::Playing
    }
}
