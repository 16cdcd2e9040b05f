//! Text-mode board widget used by the `daily-puzzle` binary.

use chess_core::{fen_of, parse_position, ChessError, UciMove};
use puzzle_session::BoardCommand;
use shakmaty::{Chess, File, Position, Rank, Square};

/// Mirrors what a graphical board would do: keeps its own copy of the
/// position, obeys [`BoardCommand`]s, and reports the position after each
/// human move it accepts.
pub struct TerminalBoard {
    position: Chess,
    gestures: bool,
}

impl Default for TerminalBoard {
    fn default() -> Self {
        Self {
            position: Chess::default(),
            gestures: false,
        }
    }
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, command: BoardCommand) -> Result<(), ChessError> {
        match command {
            BoardCommand::ApplyMove(mv) => self.position = mv.play(&self.position)?,
            BoardCommand::ResetTo { fen } => self.position = parse_position(&fen)?,
            BoardCommand::SetGestures(enabled) => self.gestures = enabled,
        }
        Ok(())
    }

    /// A human drag. Refused while gestures are off or when the move is
    /// illegal; otherwise returns the new position for the session.
    pub fn try_move(&mut self, mv: &UciMove) -> Option<String> {
        if !self.gestures {
            return None;
        }
        self.position = mv.play(&self.position).ok()?;
        Some(self.fen())
    }

    pub fn fen(&self) -> String {
        fen_of(&self.position)
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures
    }

    /// ASCII diagram, white at the bottom.
    pub fn render(&self) -> String {
        let board = self.position.board();
        let mut out = String::new();

        for rank in (0..8u32).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8u32 {
                let square = Square::from_coords(File::new(file), Rank::new(rank));
                let c = board.piece_at(square).map(|p| p.char()).unwrap_or('.');
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::fen::STANDARD_START_FEN;

    #[test]
    fn test_gestures_gate_human_moves() {
        let mut board = TerminalBoard::new();
        let e4: UciMove = "e2e4".parse().unwrap();
        assert_eq!(board.try_move(&e4), None);

        board.handle(BoardCommand::SetGestures(true)).unwrap();
        let fen = board.try_move(&e4).unwrap();
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );

        // Illegal drags leave the board alone
        let bad: UciMove = "e4e6".parse().unwrap();
        assert_eq!(board.try_move(&bad), None);
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn test_commands() {
        let mut board = TerminalBoard::new();
        board
            .handle(BoardCommand::ApplyMove("d2d4".parse().unwrap()))
            .unwrap();
        assert_ne!(board.fen(), STANDARD_START_FEN);
        assert!(board
            .handle(BoardCommand::ApplyMove("d4d6".parse().unwrap()))
            .is_err());

        board
            .handle(BoardCommand::ResetTo {
                fen: STANDARD_START_FEN.to_string(),
            })
            .unwrap();
        assert_eq!(board.fen(), STANDARD_START_FEN);
    }

    #[test]
    fn test_render() {
        let board = TerminalBoard::new();
        let diagram = board.render();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
