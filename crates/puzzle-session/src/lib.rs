//! Puzzle session state machine
//!
//! A [`Session`] walks a human through a puzzle's scripted solution line.
//! Every input (board moves, button presses, timer ticks, hint responses)
//! is an [`Event`] fed to [`Session::apply`], which returns the [`Effect`]s
//! the caller must carry out (board commands, scheduled auto-play, hint
//! fetches).

pub mod clock;
pub mod error;
pub mod event;
pub mod hint;
pub mod puzzle;
pub mod session;

pub use clock::{format_elapsed, SessionClock};
pub use error::SessionError;
pub use event::{BoardCommand, Effect, Event, ReplyDelay};
pub use hint::HintState;
pub use puzzle::Puzzle;
pub use session::{Phase, Session, SessionView};
