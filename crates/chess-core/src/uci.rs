//! UCI move tokens as they appear in puzzle solution lines (`e2e4`, `e7e8q`).

use std::fmt;
use std::str::FromStr;

use shakmaty::{Chess, File, Move, Position, Role, Square};

use crate::error::ChessError;
use crate::fen::fen_of;

/// A move given by its origin, destination and optional promotion piece.
/// Castling is written with the king's destination square (`e1g1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl UciMove {
    pub fn new(from: Square, to: Square, promotion: Option<Role>) -> Self {
        Self { from, to, promotion }
    }

    /// Express a shakmaty move as a UCI token. Drops (`Move::Put`) have no
    /// standard-chess token.
    pub fn from_move(mv: &Move) -> Option<Self> {
        match mv {
            Move::Normal { from, to, promotion, .. } => Some(Self::new(*from, *to, *promotion)),
            Move::EnPassant { from, to } => Some(Self::new(*from, *to, None)),
            Move::Castle { king, rook } => {
                let to_file = if rook.file() > king.file() { 6u32 } else { 2u32 };
                let to = Square::from_coords(File::new(to_file), king.rank());
                Some(Self::new(*king, to, None))
            }
            _ => None,
        }
    }

    /// Find the legal move in `pos` this token describes.
    pub fn to_legal(&self, pos: &Chess) -> Result<Move, ChessError> {
        pos.legal_moves()
            .iter()
            .find(|m| Self::from_move(m).as_ref() == Some(self))
            .copied()
            .ok_or_else(|| ChessError::IllegalMove {
                mv: self.to_string(),
                fen: fen_of(pos),
            })
    }

    /// Play this move on a copy of `pos`.
    pub fn play(&self, pos: &Chess) -> Result<Chess, ChessError> {
        let legal = self.to_legal(pos)?;
        let mut next = pos.clone();
        next.play_unchecked(legal);
        Ok(next)
    }
}

impl FromStr for UciMove {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || ChessError::InvalidUci(token.to_string());

        if !token.is_ascii() || !(4..=5).contains(&token.len()) {
            return Err(invalid());
        }

        let from: Square = token[0..2].parse().map_err(|_| invalid())?;
        let to: Square = token[2..4].parse().map_err(|_| invalid())?;

        let promotion = match token[4..].chars().next() {
            None => None,
            Some(c) => match Role::from_char(c.to_ascii_lowercase()) {
                Some(Role::Pawn) | Some(Role::King) | None => return Err(invalid()),
                role => role,
            },
        };

        Ok(Self { from, to, promotion })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Split a space-separated solution line into move tokens.
pub fn parse_line(moves: &str) -> Result<Vec<UciMove>, ChessError> {
    moves.split_whitespace().map(str::parse).collect()
}
