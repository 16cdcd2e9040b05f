//! Immutable puzzle data and its pre-validated solution line.

use chess_core::{fen_of, parse_position, PuzzleRecord, UciMove};
use shakmaty::{Chess, Color, Position};

use crate::error::SessionError;

/// A loaded puzzle. The solution alternates sides starting with the
/// opponent's setup move, so human moves sit at the odd indices.
#[derive(Debug, Clone)]
pub struct Puzzle {
    id: String,
    start_fen: String,
    rating: u32,
    solution: Vec<UciMove>,
    /// `line[k]` is the position after the first `k` solution plies.
    line: Vec<Chess>,
}

impl Puzzle {
    /// Build a puzzle and replay its whole line through the rules engine.
    /// A line that cannot be replayed means a corrupt record.
    pub fn new(
        id: impl Into<String>,
        start_fen: &str,
        solution: Vec<UciMove>,
        rating: u32,
    ) -> Result<Self, SessionError> {
        let id = id.into();

        if solution.len() < 2 {
            return Err(SessionError::MalformedLine {
                id,
                reason: format!("needs at least two moves, got {}", solution.len()),
            });
        }
        if solution.len() % 2 != 0 {
            return Err(SessionError::MalformedLine {
                id,
                reason: format!("expected move pairs, got {} moves", solution.len()),
            });
        }

        let start = parse_position(start_fen).map_err(|source| SessionError::Replay {
            id: id.clone(),
            source,
        })?;

        let mut line = Vec::with_capacity(solution.len() + 1);
        line.push(start);
        for mv in &solution {
            let next = mv
                .play(&line[line.len() - 1])
                .map_err(|source| SessionError::Replay {
                    id: id.clone(),
                    source,
                })?;
            line.push(next);
        }

        Ok(Self {
            start_fen: fen_of(&line[0]),
            id,
            rating,
            solution,
            line,
        })
    }

    pub fn from_record(record: &PuzzleRecord) -> Result<Self, SessionError> {
        let solution = record
            .solution_moves()
            .map_err(|source| SessionError::Replay {
                id: record.id.clone(),
                source,
            })?;
        Self::new(record.id.clone(), &record.fen, solution, record.rating)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rating(&self) -> u32 {
        self.rating
    }

    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    pub fn solution_moves(&self) -> &[UciMove] {
        &self.solution
    }

    /// Number of moves the human has to find.
    pub fn human_moves(&self) -> usize {
        self.solution.len() / 2
    }

    /// The side the human plays.
    pub fn human_side(&self) -> Color {
        self.line[1].turn()
    }

    /// Position after `plies` solution moves, clamped to the end of the line.
    pub fn position_after(&self, plies: usize) -> &Chess {
        &self.line[plies.min(self.solution.len())]
    }
}
