//! Immutable move records handed out by the rule engine.
//!
//! A [`ForcedMove`] is always built from a move the rules library generated
//! for a concrete position; callers choose among them and pass them back
//! unchanged.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Move, Square};

use crate::game_state::chess_types::PieceType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedMove {
    piece: PieceType,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
    capture: Option<PieceType>,
    san: String,
    raw: Move,
}

impl ForcedMove {
    /// Wrap `raw`, which must be legal in `position`.
    pub(crate) fn from_legal(position: &Chess, raw: Move) -> Self {
        // Castling is reported king-to-destination, not king-takes-rook.
        let (from, to) = match raw.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, .. } => (from, to),
            _ => (raw.from().unwrap_or_else(|| raw.to()), raw.to()),
        };

        let mut after = position.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut after, &raw).to_string();

        Self {
            piece: raw.role().into(),
            from,
            to,
            promotion: raw.promotion().map(PieceType::from),
            capture: raw.capture().map(PieceType::from),
            san,
            raw,
        }
    }

    #[inline]
    pub fn piece(&self) -> PieceType {
        self.piece
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceType> {
        self.promotion
    }

    #[inline]
    pub fn capture(&self) -> Option<PieceType> {
        self.capture
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Standard algebraic notation with check/mate suffix.
    pub fn san(&self) -> &str {
        &self.san
    }

    /// Long algebraic (UCI) text, e.g. `e7e8q`.
    pub fn uci(&self) -> String {
        match self.promotion {
            Some(promo) => format!("{}{}{}", self.from, self.to, promo.code()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    pub(crate) fn raw(&self) -> &Move {
        &self.raw
    }
}

impl fmt::Display for ForcedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.san)
    }
}

impl Serialize for ForcedMove {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ForcedMove", 6)?;
        state.serialize_field("piece", &self.piece)?;
        state.serialize_field("from", &self.from.to_string())?;
        state.serialize_field("to", &self.to.to_string())?;
        state.serialize_field("promotion", &self.promotion)?;
        state.serialize_field("san", &self.san)?;
        state.serialize_field("uci", &self.uci())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::fen::Fen;
    use shakmaty::{CastlingMode, Chess, Position, Square};

    use super::ForcedMove;
    use crate::game_state::chess_types::PieceType;

    fn all_moves(fen: &str) -> (Chess, Vec<ForcedMove>) {
        let position: Chess = fen
            .parse::<Fen>()
            .expect("FEN should parse")
            .into_position(CastlingMode::Standard)
            .expect("legal position");
        let moves = position
            .legal_moves()
            .into_iter()
            .map(|m| ForcedMove::from_legal(&position, m))
            .collect();
        (position, moves)
    }

    #[test]
    fn castling_uses_king_destination_square() {
        let (_, moves) = all_moves("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let castle = moves
            .iter()
            .find(|m| m.san() == "O-O")
            .expect("short castling should be legal");
        assert_eq!(castle.piece(), PieceType::King);
        assert_eq!(castle.from(), Square::E1);
        assert_eq!(castle.to(), Square::G1);
        assert_eq!(castle.uci(), "e1g1");
    }

    #[test]
    fn promotions_carry_piece_and_notation() {
        let (_, moves) = all_moves("7k/P7/8/8/8/8/8/K7 w - - 0 1");
        let promo = moves
            .iter()
            .find(|m| m.promotion() == Some(PieceType::Knight))
            .expect("knight promotion should be legal");
        assert_eq!(promo.piece(), PieceType::Pawn);
        assert_eq!(promo.uci(), "a7a8n");
        assert_eq!(promo.san(), "a8=N");
        assert!(promo.is_promotion());
    }

    #[test]
    fn captures_and_check_suffix_are_recorded() {
        let (_, moves) = all_moves("7k/8/8/3p4/4Q3/8/8/4K3 w - - 0 1");
        let capture = moves
            .iter()
            .find(|m| m.uci() == "e4d5")
            .expect("queen capture should be legal");
        assert_eq!(capture.capture(), Some(PieceType::Pawn));
        assert_eq!(capture.san(), "Qxd5");

        let check = moves
            .iter()
            .find(|m| m.uci() == "e4e5")
            .expect("queen advance should be legal");
        assert_eq!(check.san(), "Qe5+");
    }

    #[test]
    fn serializes_squares_as_names() {
        let (_, moves) = all_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let push = moves
            .iter()
            .find(|m| m.uci() == "e2e4")
            .expect("double push should be legal");
        let json = serde_json::to_value(push).expect("serialize");
        assert_eq!(json["piece"], "p");
        assert_eq!(json["from"], "e2");
        assert_eq!(json["to"], "e4");
        assert_eq!(json["san"], "e4");
        assert!(json["promotion"].is_null());
    }
}
