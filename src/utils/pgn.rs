//! PGN export for finished or ongoing games.
//!
//! Besides the seven-tag roster the output carries the game's `Seed` and a
//! `Variant` tag, and every move is followed by a comment naming the piece
//! type it was forced to be, e.g. `1. e4 {p} Nc6 {n}`.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::chess_types::{Side, Status};
use crate::game_state::game_state::Game;

pub const VARIANT_TAG: &str = "Forced piece type";

/// PGN with default headers derived from `game`.
pub fn write_pgn(game: &Game) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Chill Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        Local::now().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());

    write_pgn_with_headers(game, &headers)
}

/// PGN with caller headers. `Result`, `Seed`, `Variant` and the setup tags
/// always reflect the game and override caller values.
pub fn write_pgn_with_headers(game: &Game, headers: &BTreeMap<String, String>) -> String {
    let mut headers = headers.clone();
    let result = result_token(game.status(), game.turn());
    headers.insert("Result".to_owned(), result.to_owned());
    headers.insert("Seed".to_owned(), game.seed().to_string());
    headers.insert("Variant".to_owned(), VARIANT_TAG.to_owned());
    if game.starts_from_standard_position() {
        headers.remove("SetUp");
        headers.remove("FEN");
    } else {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), game.initial_fen().to_owned());
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut fullmove = starting_fullmove(game.initial_fen());
    let mut movetext_parts = Vec::<String>::with_capacity(game.history().len() + 1);
    for (ply, played) in game.history().iter().enumerate() {
        let annotated = format!("{} {{{}}}", played.mv.san(), played.forced_type);
        match played.side {
            Side::White => movetext_parts.push(format!("{fullmove}. {annotated}")),
            Side::Black if ply == 0 => movetext_parts.push(format!("{fullmove}... {annotated}")),
            Side::Black => movetext_parts.push(annotated),
        }
        if played.side == Side::Black {
            fullmove += 1;
        }
    }
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// PGN result token; on checkmate the side to move has lost.
pub fn result_token(status: Status, side_to_move: Side) -> &'static str {
    match (status, side_to_move) {
        (Status::Checkmate, Side::White) => "0-1",
        (Status::Checkmate, Side::Black) => "1-0",
        (Status::Stalemate | Status::Draw, _) => "1/2-1/2",
        (Status::Playing, _) => "*",
    }
}

fn starting_fullmove(fen: &str) -> u32 {
    fen.split_whitespace()
        .nth(5)
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{result_token, write_pgn, write_pgn_with_headers};
    use crate::game_state::chess_types::{Side, Status};
    use crate::game_state::game_state::Game;

    #[test]
    fn start_position_game_has_seed_and_forced_type_comments() {
        let mut game = Game::new("seed-ChillChess");
        game.play_uci("e2e4").expect("pawn is forced");
        game.play_uci("b8c6").expect("knight is forced");

        let pgn = write_pgn(&game);
        assert!(pgn.contains("[Seed \"seed-ChillChess\"]\n"));
        assert!(pgn.contains("[Variant \"Forced piece type\"]\n"));
        assert!(pgn.contains("[Result \"*\"]\n"));
        assert!(!pgn.contains("[FEN "));
        assert!(pgn.contains("1. e4 {p} Nc6 {n}"));
        assert!(pgn.trim_end().ends_with('*'));
    }

    #[test]
    fn custom_start_emits_setup_and_black_move_numbering() {
        let mut game =
            Game::from_fen("k7/p7/P7/8/8/8/8/K7 b - - 0 12", "setup").expect("legal FEN");
        game.play_uci("a8b8").expect("only the king can move");

        let mut headers = BTreeMap::new();
        headers.insert("Event".to_owned(), "Custom \"quoted\"".to_owned());
        let pgn = write_pgn_with_headers(&game, &headers);
        assert!(pgn.contains("[SetUp \"1\"]\n"));
        assert!(pgn.contains("[FEN \"k7/p7/P7/8/8/8/8/K7 b - - 0 12\"]\n"));
        assert!(pgn.contains("[Event \"Custom \\\"quoted\\\"\"]\n"));
        assert!(pgn.contains("12... Kb8 {k}"));
    }

    #[test]
    fn result_tokens_follow_status() {
        assert_eq!(result_token(Status::Checkmate, Side::White), "0-1");
        assert_eq!(result_token(Status::Checkmate, Side::Black), "1-0");
        assert_eq!(result_token(Status::Stalemate, Side::White), "1/2-1/2");
        assert_eq!(result_token(Status::Draw, Side::Black), "1/2-1/2");
        assert_eq!(result_token(Status::Playing, Side::White), "*");
    }
}
