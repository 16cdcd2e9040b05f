//! Chess primitives shared by the puzzle crates: FEN handling, UCI move
//! tokens, the position differ and the puzzle record wire type.

pub mod differ;
pub mod error;
pub mod fen;
pub mod puzzle_record;
pub mod uci;

pub use differ::{diff, diff_positions};
pub use error::ChessError;
pub use fen::{fen_of, parse_position, turn_of};
pub use puzzle_record::PuzzleRecord;
pub use uci::UciMove;
