//! Crate root module declarations for Chill Chess.
//!
//! Chill Chess is chess where, every turn, a seeded RNG picks the piece type
//! the side to move must use. This crate holds the deterministic core: the
//! seeded RNG, the variant rule engine built on `shakmaty`, the greedy
//! material opponent, self-play and PGN export. A board UI only needs
//! [`game_state::game_state::Game`] and its snapshot.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod forced_move;
    pub mod move_ordering;
}

pub mod rng {
    pub mod seeded_rng;
}

pub mod search {
    pub mod board_scoring;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod pgn;
}

pub use engines::engine_greedy::pick_engine_move;
pub use errors::{ChillChessError, ChillResult};
pub use game_state::chess_types::{PieceType, Side, Status};
pub use game_state::game_state::{Game, GameSnapshot, PlayedMove};
pub use moves::forced_move::ForcedMove;
pub use rng::seeded_rng::{Seed, SeededRng};
