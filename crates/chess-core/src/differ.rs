//! Infer the move played between two position snapshots.

use shakmaty::{Chess, Position};
use tracing::debug;

use crate::fen::{fen_of, parse_position};
use crate::uci::UciMove;

/// Find the single legal move that turns `before` into `after`.
///
/// Returns `None` when either FEN is unreadable, the positions are equal, or
/// no legal move bridges them. Candidates are probed on clones in the rules
/// engine's generation order and the first match wins.
pub fn diff(before: &str, after: &str) -> Option<UciMove> {
    let before_pos = match parse_position(before) {
        Ok(pos) => pos,
        Err(e) => {
            debug!(error = %e, "Differ: unreadable before position");
            return None;
        }
    };
    let after_pos = match parse_position(after) {
        Ok(pos) => pos,
        Err(e) => {
            debug!(error = %e, "Differ: unreadable after position");
            return None;
        }
    };

    diff_positions(&before_pos, &after_pos)
}

/// Same as [`diff`] for positions that are already parsed.
pub fn diff_positions(before: &Chess, after: &Chess) -> Option<UciMove> {
    let target = fen_of(after);
    if fen_of(before) == target {
        return None;
    }

    before.legal_moves().iter().find_map(|m| {
        let mut probe = before.clone();
        probe.play_unchecked(*m);
        if fen_of(&probe) == target {
            UciMove::from_move(m)
        } else {
            None
        }
    })
}
