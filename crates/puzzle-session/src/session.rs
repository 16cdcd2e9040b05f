//! The puzzle session reducer.

use chess_core::{diff_positions, fen_of, parse_position, UciMove};
use serde::Serialize;
use shakmaty::{Chess, Color, Position};
use tracing::{debug, info, warn};

use crate::clock::SessionClock;
use crate::event::{BoardCommand, Effect, Event, ReplyDelay};
use crate::hint::{HintState, CONGRATULATIONS, ENCOURAGEMENT, REJECTION};
use crate::puzzle::Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// At the puzzle's start position, setup move scheduled.
    Ready,
    /// The human moved correctly; the opponent's reply is scheduled.
    AwaitingReply,
    /// Waiting for the human's move.
    InProgress,
    /// Every human move found. Only undo and reset are accepted.
    Completed,
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub puzzle_id: String,
    pub rating: u32,
    pub phase: Phase,
    pub cursor: usize,
    pub redo_watermark: usize,
    pub completed: bool,
    /// 1-based solution index of the move the human owes next
    pub move_number: usize,
    pub fen: String,
    pub hint: String,
    pub elapsed_seconds: u64,
    pub gestures_enabled: bool,
}

/// State of one attempt at a puzzle.
///
/// `cursor` counts committed human moves, so the move the human owes next is
/// `solution[2 * cursor + 1]` and the board shows the scripted line up to
/// `plies`. Wrong moves never reach this struct; the board is told to take
/// them back.
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    phase: Phase,
    cursor: usize,
    redo_watermark: usize,
    completed: bool,
    plies: usize,
    side_to_move: Color,
    hint: HintState,
    clock: SessionClock,
    /// Bumped whenever a scheduled auto-play is superseded.
    generation: u64,
    hint_requests: u64,
}

impl Session {
    pub fn new(puzzle: Puzzle) -> Self {
        let side_to_move = puzzle.position_after(0).turn();
        Self {
            puzzle,
            phase: Phase::Ready,
            cursor: 0,
            redo_watermark: 0,
            completed: false,
            plies: 0,
            side_to_move,
            hint: HintState::Idle,
            clock: SessionClock::new(),
            generation: 0,
            hint_requests: 0,
        }
    }

    /// Show the start position and schedule the setup move.
    pub fn begin(&mut self) -> Vec<Effect> {
        info!(puzzle_id = %self.puzzle.id(), rating = self.puzzle.rating(), "Puzzle session started");
        let mut effects = Vec::new();
        self.restart_line(&mut effects);
        effects
    }

    /// Feed one event through the state machine.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            Event::UserMoved { fen } => self.on_user_moved(&fen, &mut effects),
            Event::ReplyDue { generation } => self.on_reply_due(generation, &mut effects),
            Event::Undo => self.on_undo(&mut effects),
            Event::Redo => self.on_redo(&mut effects),
            Event::Reset => self.on_reset(&mut effects),
            Event::HintRequested => self.on_hint_requested(&mut effects),
            Event::HintLoaded { request, text } => {
                self.settle_hint(request, HintState::Text(text))
            }
            Event::HintFailed { request, message } => {
                self.settle_hint(request, HintState::Error(message))
            }
            Event::Tick => {
                self.clock.tick();
            }
        }

        debug_assert!(self.invariants_hold(), "session invariants broken: {:?}", self);
        effects
    }

    fn on_user_moved(&mut self, fen: &str, effects: &mut Vec<Effect>) {
        if self.phase != Phase::InProgress {
            debug!(phase = ?self.phase, "Ignoring board move outside the human's turn");
            effects.push(self.snap_back());
            return;
        }

        let new_pos = match parse_position(fen) {
            Ok(pos) => pos,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable board position");
                return;
            }
        };

        // Same side still to move: nothing was played
        if new_pos.turn() == self.side_to_move {
            return;
        }

        let Some(played) = diff_positions(self.current_position(), &new_pos) else {
            debug!(fen, "No legal move bridges the board update");
            effects.push(self.snap_back());
            return;
        };

        let expected = self.expected_move();
        if expected != Some(played) {
            debug!(cursor = self.cursor, played = %played, "Wrong move");
            self.replace_hint(HintState::Text(REJECTION.to_string()), effects);
            effects.push(self.snap_back());
            return;
        }

        self.cursor += 1;
        self.redo_watermark = self.redo_watermark.max(self.cursor);
        self.set_plies(2 * self.cursor);

        if self.cursor == self.puzzle.human_moves() {
            self.complete(effects);
        } else {
            debug!(cursor = self.cursor, played = %played, "Correct move");
            self.replace_hint(HintState::Text(ENCOURAGEMENT.to_string()), effects);
            self.phase = Phase::AwaitingReply;
            effects.push(Effect::Board(BoardCommand::SetGestures(false)));
            self.schedule(ReplyDelay::Reply, effects);
        }
    }

    fn on_reply_due(&mut self, generation: u64, effects: &mut Vec<Effect>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Dropping superseded auto-play");
            return;
        }

        let ply = match self.phase {
            Phase::Ready => 0,
            Phase::AwaitingReply => 2 * self.cursor,
            _ => return,
        };

        let mv = self.puzzle.solution_moves()[ply];
        self.set_plies(ply + 1);
        self.phase = Phase::InProgress;
        effects.push(Effect::Board(BoardCommand::ApplyMove(mv)));
        effects.push(Effect::Board(BoardCommand::SetGestures(true)));
    }

    fn on_undo(&mut self, effects: &mut Vec<Effect>) {
        self.replace_hint(HintState::Idle, effects);

        if self.cursor <= 1 {
            debug!(cursor = self.cursor, "Undo back to the puzzle start");
            self.restart_line(effects);
            return;
        }

        self.supersede_reply(effects);
        self.cursor -= 1;
        self.completed = false;
        self.set_plies(2 * self.cursor + 1);
        self.phase = Phase::InProgress;
        effects.push(Effect::Board(BoardCommand::ResetTo {
            fen: self.current_fen(),
        }));
        effects.push(Effect::Board(BoardCommand::SetGestures(true)));
    }

    fn on_redo(&mut self, effects: &mut Vec<Effect>) {
        if self.phase != Phase::InProgress || self.cursor >= self.redo_watermark {
            debug!(cursor = self.cursor, watermark = self.redo_watermark, "Nothing to redo");
            return;
        }

        self.replace_hint(HintState::Idle, effects);

        let human_ply = 2 * self.cursor + 1;
        let solution = self.puzzle.solution_moves();
        let human_move = solution[human_ply];
        let reply = solution.get(human_ply + 1).copied();

        effects.push(Effect::Board(BoardCommand::ApplyMove(human_move)));
        self.cursor += 1;

        match reply {
            Some(reply) if self.cursor < self.puzzle.human_moves() => {
                effects.push(Effect::Board(BoardCommand::ApplyMove(reply)));
                self.set_plies(human_ply + 2);
            }
            _ => {
                self.set_plies(human_ply + 1);
                self.complete(effects);
            }
        }
    }

    fn on_reset(&mut self, effects: &mut Vec<Effect>) {
        info!(puzzle_id = %self.puzzle.id(), "Puzzle reset");
        self.replace_hint(HintState::Idle, effects);
        self.redo_watermark = 0;
        self.clock.restart();
        self.restart_line(effects);
    }

    fn on_hint_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.hint.is_loading() {
            debug!("Hint already on its way");
            return;
        }
        if matches!(self.phase, Phase::Ready | Phase::Completed) {
            debug!(phase = ?self.phase, "No hint to give right now");
            return;
        }

        self.hint_requests += 1;
        let request = self.hint_requests;
        self.hint = HintState::Loading { request };
        effects.push(Effect::FetchHint {
            request,
            puzzle_id: self.puzzle.id().to_string(),
            move_number: self.hint_move_number(),
        });
    }

    fn settle_hint(&mut self, request: u64, outcome: HintState) {
        if self.hint != (HintState::Loading { request }) {
            debug!(request, "Dropping stale hint response");
            return;
        }
        self.hint = outcome;
    }

    /// Back to the start position with the setup move pending.
    fn restart_line(&mut self, effects: &mut Vec<Effect>) {
        self.supersede_reply(effects);
        self.cursor = 0;
        self.completed = false;
        self.set_plies(0);
        self.phase = Phase::Ready;
        effects.push(Effect::Board(BoardCommand::ResetTo {
            fen: self.current_fen(),
        }));
        effects.push(Effect::Board(BoardCommand::SetGestures(false)));
        self.schedule(ReplyDelay::Opening, effects);
    }

    fn complete(&mut self, effects: &mut Vec<Effect>) {
        info!(
            puzzle_id = %self.puzzle.id(),
            elapsed = self.clock.elapsed_seconds(),
            "Puzzle completed"
        );
        self.completed = true;
        self.phase = Phase::Completed;
        self.clock.stop();
        self.replace_hint(HintState::Text(CONGRATULATIONS.to_string()), effects);
        effects.push(Effect::Board(BoardCommand::SetGestures(false)));
    }

    fn schedule(&mut self, delay: ReplyDelay, effects: &mut Vec<Effect>) {
        self.generation += 1;
        effects.push(Effect::ScheduleReply {
            delay,
            generation: self.generation,
        });
    }

    fn supersede_reply(&mut self, effects: &mut Vec<Effect>) {
        if matches!(self.phase, Phase::Ready | Phase::AwaitingReply) {
            effects.push(Effect::CancelReply);
        }
        self.generation += 1;
    }

    /// Swap the hint, cancelling any request still in flight.
    fn replace_hint(&mut self, hint: HintState, effects: &mut Vec<Effect>) {
        if self.hint.is_loading() {
            effects.push(Effect::CancelHint);
        }
        self.hint = hint;
    }

    fn set_plies(&mut self, plies: usize) {
        self.plies = plies;
        self.side_to_move = self.current_position().turn();
    }

    fn snap_back(&self) -> Effect {
        Effect::Board(BoardCommand::ResetTo {
            fen: self.current_fen(),
        })
    }

    fn invariants_hold(&self) -> bool {
        let human_moves = self.puzzle.human_moves();
        self.cursor <= self.redo_watermark
            && self.redo_watermark <= human_moves
            && (!self.completed || self.cursor == human_moves)
            && self.completed == (self.phase == Phase::Completed)
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn redo_watermark(&self) -> usize {
        self.redo_watermark
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn current_position(&self) -> &Chess {
        self.puzzle.position_after(self.plies)
    }

    pub fn current_fen(&self) -> String {
        fen_of(self.current_position())
    }

    pub fn hint(&self) -> &HintState {
        &self.hint
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Board input is only meaningful while the human is to move.
    pub fn gestures_enabled(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// The move the human owes next, if any.
    pub fn expected_move(&self) -> Option<UciMove> {
        if self.completed {
            return None;
        }
        self.puzzle.solution_moves().get(2 * self.cursor + 1).copied()
    }

    /// 1-based index of the expected move in the solution line, as the hint
    /// service counts moves.
    pub fn hint_move_number(&self) -> usize {
        2 * (self.cursor + 1)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            puzzle_id: self.puzzle.id().to_string(),
            rating: self.puzzle.rating(),
            phase: self.phase,
            cursor: self.cursor,
            redo_watermark: self.redo_watermark,
            completed: self.completed,
            move_number: self.hint_move_number(),
            fen: self.current_fen(),
            hint: self.hint.display().to_string(),
            elapsed_seconds: self.clock.elapsed_seconds(),
            gestures_enabled: self.gestures_enabled(),
        }
    }
}
