use chess_core::ChessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Error text sent back by the puzzle service.
    #[error("{0}")]
    Service(String),

    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    #[error("No hint available.")]
    MissingHint,

    #[error("No best move available.")]
    MissingBestMove,

    #[error("Invalid best move: {0}")]
    InvalidMove(#[from] ChessError),
}
