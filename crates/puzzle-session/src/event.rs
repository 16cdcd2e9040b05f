//! Messages flowing into and out of the session reducer.

use chess_core::UciMove;

/// Inputs to [`Session::apply`](crate::Session::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The board widget finished a human move and reports the new position.
    UserMoved { fen: String },
    /// A scheduled auto-play has come due.
    ReplyDue { generation: u64 },
    Undo,
    Redo,
    Reset,
    HintRequested,
    HintLoaded { request: u64, text: String },
    HintFailed { request: u64, message: String },
    /// One second of wall-clock time has passed.
    Tick,
}

/// Commands consumed by the board widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Animate a scripted or replayed move.
    ApplyMove(UciMove),
    /// Replace the displayed position.
    ResetTo { fen: String },
    /// Allow or forbid drag-and-drop input.
    SetGestures(bool),
}

/// Which fixed delay an auto-play waits for before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyDelay {
    /// Before the puzzle's setup move.
    Opening,
    /// Before the opponent answers a correct human move.
    Reply,
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Board(BoardCommand),
    /// Deliver `Event::ReplyDue { generation }` after `delay`.
    ScheduleReply { delay: ReplyDelay, generation: u64 },
    /// Drop any scheduled auto-play.
    CancelReply,
    /// Fetch a hint and deliver `HintLoaded`/`HintFailed` with `request`.
    FetchHint {
        request: u64,
        puzzle_id: String,
        move_number: usize,
    },
    /// Abort the in-flight hint request.
    CancelHint,
}
