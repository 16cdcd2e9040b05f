//! HTTP client for the puzzle service: random puzzles, per-move hints and
//! best moves.

pub mod client;
pub mod config;
pub mod error;

pub use client::PuzzleClient;
pub use config::ClientConfig;
pub use error::ClientError;
