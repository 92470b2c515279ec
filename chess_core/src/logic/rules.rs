use crate::engine::Move;
use crate::logic::board::{Board, PieceKind, Side};
use crate::logic::generator::MoveGenerator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("the piece on the source square belongs to the other side")]
    NotYourTurn,
    #[error("the piece cannot move there")]
    IllegalMove,
    #[error("the game is already over")]
    GameOver,
}

/// Checks `mv` against the pseudo-legal move list of the piece it moves.
pub fn is_valid_move(board: &Board, mv: Move, turn: Side) -> Result<(), MoveError> {
    let piece = board.get_piece(mv.from).ok_or(MoveError::NoPieceAtSource)?;
    if piece.side != turn {
        return Err(MoveError::NotYourTurn);
    }
    if MoveGenerator::new().moves_from(board, mv.from).contains(&mv) {
        Ok(())
    } else {
        Err(MoveError::IllegalMove)
    }
}

/// `(white_king, black_king)`: whether each side still has a King.
#[must_use]
pub fn kings_present(board: &Board) -> (bool, bool) {
    let mut white_king = false;
    let mut black_king = false;
    for (_, piece) in board.pieces() {
        if piece.kind == PieceKind::King {
            match piece.side {
                Side::White => white_king = true,
                Side::Black => black_king = true,
            }
        }
    }
    (white_king, black_king)
}

/// The side that has captured the opposing King, if any. A board without a
/// White King counts as a Black win even when Black's King is gone too.
#[must_use]
pub fn winner(board: &Board) -> Option<Side> {
    match kings_present(board) {
        (false, _) => Some(Side::Black),
        (true, false) => Some(Side::White),
        (true, true) => None,
    }
}
