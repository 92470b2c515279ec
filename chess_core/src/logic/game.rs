use crate::engine::Move;
use crate::logic::board::{Board, Piece, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{is_valid_move, winner, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// The other side's King has been captured.
    Won(Side),
    /// Both sides passed in a row because neither had a move to play.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub side: Side,
}

/// Live game: the current board plus everything the loop needs to drive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
    consecutive_passes: u8,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::White)
    }

    #[must_use]
    pub fn from_board(board: Board, turn: Side) -> Self {
        let mut state = Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
            consecutive_passes: 0,
        };
        state.update_status();
        state
    }

    /// Validates and plays `mv` for the side to move.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        is_valid_move(&self.board, mv, self.turn)?;

        let piece = self
            .board
            .get_piece(mv.from)
            .ok_or(MoveError::NoPieceAtSource)?;
        let record = MoveRecord {
            mv,
            piece,
            captured: self.board.get_piece(mv.to),
            side: self.turn,
        };

        self.board = self.board.apply(mv);
        self.history.push(record.clone());
        self.turn = self.turn.opposite();
        self.consecutive_passes = 0;
        self.update_status();

        Ok(record)
    }

    /// Hands the turn over without moving. Two passes in a row end the game.
    pub fn pass(&mut self) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        log::debug!("{} passes", self.turn);
        self.turn = self.turn.opposite();
        self.consecutive_passes = self.consecutive_passes.saturating_add(1);
        self.update_status();
        Ok(())
    }

    /// Whether the side to move has anything to play.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        MoveGenerator::new().has_legal_moves(&self.board, self.turn)
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        !matches!(self.status, GameStatus::Playing)
    }

    fn update_status(&mut self) {
        if let Some(side) = winner(&self.board) {
            log::info!("{side} wins: opposing King captured");
            self.status = GameStatus::Won(side);
        } else if self.consecutive_passes >= 2 {
            log::info!("neither side can move");
            self.status = GameStatus::Exhausted;
        }
    }
}
