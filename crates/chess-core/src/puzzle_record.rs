use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::uci::{parse_line, UciMove};

/// A puzzle as served by the puzzle service (`GET /puzzles/random/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "FEN")]
    pub fen: String,
    #[serde(rename = "Moves")]
    pub moves: String, // space-separated UCI tokens
    #[serde(rename = "Rating", default)]
    pub rating: u32,
}

impl PuzzleRecord {
    pub fn solution_moves(&self) -> Result<Vec<UciMove>, ChessError> {
        parse_line(&self.moves)
    }
}
