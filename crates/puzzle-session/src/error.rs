use chess_core::ChessError;
use thiserror::Error;

/// A puzzle record that cannot back a session. These indicate a corrupt
/// record and are fatal for the puzzle screen.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Puzzle {id}: {reason}")]
    MalformedLine { id: String, reason: String },

    #[error("Puzzle {id} does not replay: {source}")]
    Replay {
        id: String,
        #[source]
        source: ChessError,
    },
}
