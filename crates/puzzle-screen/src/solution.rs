//! Best-move lookups for the `solution` command.

use std::sync::Arc;

use puzzle_client::PuzzleClient;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Fetch the best move in the background and send back the line to print.
pub fn spawn_best_move(
    client: Arc<PuzzleClient>,
    puzzle_id: String,
    move_number: usize,
    tx: mpsc::UnboundedSender<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let line = match client.fetch_best_move(&puzzle_id, move_number).await {
            Ok(mv) => format!("Best move: {mv}"),
            Err(e) => {
                warn!(error = %e, puzzle_id = %puzzle_id, move_number, "Best move request failed");
                format!("Error: {e}")
            }
        };
        let _ = tx.send(line);
    })
}
