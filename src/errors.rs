//! Errors returned by the rule engine.
//!
//! Only caller mistakes are represented here. A position with no legal moves
//! is not an error: it shows up as a terminal [`Status`] and a `None` forced
//! type. Choosing from an empty candidate list is a broken invariant and
//! panics inside [`SeededRng::choice`](crate::rng::seeded_rng::SeededRng::choice).

use crate::game_state::chess_types::{PieceType, Status};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChillChessError {
    /// The move is not among the moves of the current forced type.
    #[error("move {requested} is not a legal {} move", forced_label(.forced_type))]
    InvalidMoveRequest {
        requested: String,
        forced_type: Option<PieceType>,
    },

    /// The game reached a terminal status and accepts no further moves.
    #[error("game is over ({status})")]
    GameOver { status: Status },

    /// The FEN text could not be parsed or describes an illegal setup.
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move or square text that is not valid UCI notation.
    #[error("invalid UCI move '{0}'")]
    InvalidUci(String),
}

fn forced_label(forced_type: &Option<PieceType>) -> &'static str {
    match forced_type {
        Some(piece) => piece.name(),
        None => "(no forced type)",
    }
}

/// Result type alias for rule engine operations.
pub type ChillResult<T> = Result<T, ChillChessError>;

#[cfg(test)]
mod tests {
    use super::ChillChessError;
    use crate::game_state::chess_types::{PieceType, Status};

    #[test]
    fn messages_name_the_forced_type_and_status() {
        let err = ChillChessError::InvalidMoveRequest {
            requested: "g1f3".to_owned(),
            forced_type: Some(PieceType::Pawn),
        };
        assert_eq!(err.to_string(), "move g1f3 is not a legal pawn move");

        let err = ChillChessError::GameOver {
            status: Status::Checkmate,
        };
        assert_eq!(err.to_string(), "game is over (checkmate)");
    }
}
