//! Screen error types

use puzzle_client::ClientError;
use puzzle_session::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    /// Network trouble while loading; the user may retry.
    #[error("Could not load puzzle: {0}")]
    Fetch(#[from] ClientError),

    /// The served puzzle cannot be played.
    #[error("Corrupt puzzle: {0}")]
    Corrupt(#[from] SessionError),
}
