//! FEN parsing and rendering on top of shakmaty.

use shakmaty::{fen::Fen, CastlingMode, Chess, Color, EnPassantMode, Position};
use tracing::debug;

use crate::error::ChessError;

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a legal standard-chess position.
pub fn parse_position(fen: &str) -> Result<Chess, ChessError> {
    let parsed: Fen = fen.trim().parse().map_err(|e| ChessError::InvalidFen {
        fen: fen.to_string(),
        reason: format!("{e}"),
    })?;

    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })
}

/// Render a position as FEN. En passant squares are only written when a
/// capture is actually possible, so two equal positions always render equal.
pub fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Side to move of a FEN position, or `None` when the FEN is unreadable.
pub fn turn_of(fen: &str) -> Option<Color> {
    match parse_position(fen) {
        Ok(pos) => Some(pos.turn()),
        Err(e) => {
            debug!(error = %e, "Cannot resolve turn");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_of_reads_side_to_move() {
        assert_eq!(turn_of(STANDARD_START_FEN), Some(Color::White));
        assert_eq!(
            turn_of("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"),
            Some(Color::Black)
        );
    }

    #[test]
    fn test_turn_of_malformed() {
        assert_eq!(turn_of(""), None);
        assert_eq!(turn_of("not a fen"), None);
        assert_eq!(turn_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"), None);
        // No kings on the board
        assert_eq!(turn_of("8/8/8/8/8/8/8/8 w - - 0 1"), None);
    }

    #[test]
    fn test_fen_of_roundtrips_start() {
        let pos = parse_position(STANDARD_START_FEN).unwrap();
        assert_eq!(fen_of(&pos), STANDARD_START_FEN);
    }
}
