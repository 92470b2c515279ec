use crate::engine::Move;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: u8 = 8;
const SQUARE_COUNT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Rank delta of a pawn step. White advances toward rank 0.
    pub const fn forward(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    pub const fn back_rank(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// White is the maximizing side of every search.
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Self::White)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("White"),
            Self::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[must_use]
    pub const fn symbol(self) -> char {
        let letter = self.kind.letter();
        match self.side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = PieceKind::ALL
            .into_iter()
            .find(|kind| kind.letter() == symbol.to_ascii_lowercase())?;
        Some(Self { kind, side })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square ({rank}, {file}) is off the board")]
pub struct SquareOutOfRange {
    pub rank: u8,
    pub file: u8,
}

/// A square on the 8x8 board. Rank 0 is Black's back rank.
///
/// The index is private, so every `Square` in circulation is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square(u8);

impl Square {
    #[must_use]
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < BOARD_SIZE && file < BOARD_SIZE {
            Some(Self(rank * BOARD_SIZE + file))
        } else {
            None
        }
    }

    pub const fn rank(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    pub const fn file(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Steps by `(dr, df)`; `None` once the step leaves the board.
    #[must_use]
    pub fn offset(self, dr: i8, df: i8) -> Option<Self> {
        let rank = u8::try_from(i16::from(self.rank()) + i16::from(dr)).ok()?;
        let file = u8::try_from(i16::from(self.file()) + i16::from(df)).ok()?;
        Self::new(rank, file)
    }

    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self((BOARD_SIZE - 1 - self.rank()) * BOARD_SIZE + self.file())
    }

    /// All 64 squares, rank by rank, file by file.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Self)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareOutOfRange;

    fn try_from((rank, file): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(rank, file).ok_or(SquareOutOfRange { rank, file })
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> Self {
        (square.rank(), square.file())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.file());
        write!(f, "{file}{}", BOARD_SIZE - self.rank())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} covers {files} files")]
    RankLength { rank: u8, files: u8 },
    #[error("unknown piece symbol '{0}'")]
    InvalidSymbol(char),
}

/// An immutable chess position. Moves produce new boards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_pieces(Side::White);
        board.setup_pieces(Side::Black);
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; SQUARE_COUNT],
        }
    }

    fn setup_pieces(&mut self, side: Side) {
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, kind) in (0..BOARD_SIZE).zip(back_row) {
            if let Some(sq) = Square::new(side.back_rank(), file) {
                self.place(sq, Some(Piece::new(kind, side)));
            }
            if let Some(sq) = Square::new(side.pawn_start_rank(), file) {
                self.place(sq, Some(Piece::new(PieceKind::Pawn, side)));
            }
        }
    }

    fn place(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(slot) = self.grid.get_mut(square.index()) {
            *slot = piece;
        }
    }

    /// Builder used to set up positions; returns the extended copy.
    #[must_use]
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.place(square, Some(piece));
        self
    }

    #[must_use]
    pub fn without_piece(mut self, square: Square) -> Self {
        self.place(square, None);
        self
    }

    #[must_use]
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.grid.get(square.index()).copied().flatten()
    }

    #[must_use]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    /// Occupied squares in rank/file order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get_piece(sq).map(|piece| (sq, piece)))
    }

    #[must_use]
    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces().filter(|(_, piece)| piece.side == side).count()
    }

    /// Returns the position after `mv`. Whatever stood on `mv.to` is dropped.
    ///
    /// No legality check happens here. An empty source square yields an
    /// unchanged copy.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Self {
        let mut next = *self;
        if let Some(piece) = self.get_piece(mv.from) {
            next.place(mv.from, None);
            next.place(mv.to, Some(piece));
        }
        next
    }

    /// Swaps ranks top to bottom and flips every piece's side.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut mirrored = Self::empty();
        for (sq, piece) in self.pieces() {
            mirrored.place(sq.mirrored(), Some(Piece::new(piece.kind, piece.side.opposite())));
        }
        mirrored
    }

    /// FEN piece-placement field, rank 0 first.
    #[must_use]
    pub fn to_placement(&self) -> String {
        let mut placement = String::new();
        for rank in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for file in 0..BOARD_SIZE {
                match Square::new(rank, file).and_then(|sq| self.get_piece(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            placement.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        placement.push(piece.symbol());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                placement.push_str(&empty_count.to_string());
            }
            if rank + 1 < BOARD_SIZE {
                placement.push('/');
            }
        }
        placement
    }

    pub fn from_placement(placement: &str) -> Result<Self, PlacementError> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != usize::from(BOARD_SIZE) {
            return Err(PlacementError::RankCount(rows.len()));
        }

        let mut board = Self::empty();
        for (rank, row) in (0..BOARD_SIZE).zip(rows) {
            let mut file: u8 = 0;
            for symbol in row.chars() {
                if let Some(skip) = symbol.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file = file.saturating_add(u8::try_from(skip).unwrap_or(BOARD_SIZE));
                } else {
                    let piece =
                        Piece::from_symbol(symbol).ok_or(PlacementError::InvalidSymbol(symbol))?;
                    let square =
                        Square::new(rank, file).ok_or(PlacementError::RankLength {
                            rank,
                            files: file.saturating_add(1),
                        })?;
                    board.place(square, Some(piece));
                    file += 1;
                }
            }
            if file != BOARD_SIZE {
                return Err(PlacementError::RankLength { rank, files: file });
            }
        }
        Ok(board)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_placement()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - rank)?;
            for file in 0..BOARD_SIZE {
                let symbol = Square::new(rank, file)
                    .and_then(|sq| self.get_piece(sq))
                    .map_or('.', Piece::symbol);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// The standard starting position.
#[must_use]
pub fn initial_position() -> Board {
    Board::new()
}

/// Returns a new board with `mv` applied; `board` is left untouched.
#[must_use]
pub fn apply(board: &Board, mv: Move) -> Board {
    board.apply(mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(rank: u8, file: u8) -> Square {
        Square::new(rank, file).unwrap()
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();

        let king = board.get_piece(sq(7, 4)).unwrap();
        assert_eq!(king, Piece::new(PieceKind::King, Side::White));
        let queen = board.get_piece(sq(0, 3)).unwrap();
        assert_eq!(queen, Piece::new(PieceKind::Queen, Side::Black));

        for file in 0..8 {
            assert_eq!(
                board.get_piece(sq(6, file)),
                Some(Piece::new(PieceKind::Pawn, Side::White))
            );
            assert_eq!(
                board.get_piece(sq(1, file)),
                Some(Piece::new(PieceKind::Pawn, Side::Black))
            );
        }
        assert_eq!(board.piece_count(Side::White), 16);
        assert_eq!(board.piece_count(Side::Black), 16);
    }

    #[test]
    fn test_placement_generation() {
        let board = Board::new();
        assert_eq!(
            board.to_placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(Board::from_placement(&board.to_placement()), Ok(board));
    }

    #[test]
    fn test_placement_errors() {
        assert_eq!(
            Board::from_placement("8/8/8"),
            Err(PlacementError::RankCount(3))
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/7"),
            Err(PlacementError::RankLength { rank: 7, files: 7 })
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/7x"),
            Err(PlacementError::InvalidSymbol('x'))
        );
        assert!(Board::from_placement("8/8/8/8/8/8/8/8P").is_err());
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new();
        let mv = Move::new(sq(6, 4), sq(4, 4));
        let next = board.apply(mv);

        assert!(next.is_empty(sq(6, 4)));
        assert_eq!(
            next.get_piece(sq(4, 4)),
            Some(Piece::new(PieceKind::Pawn, Side::White))
        );
        // Source board is a separate value.
        assert!(board.is_empty(sq(4, 4)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_apply_capture_discards_target() {
        let board = Board::empty()
            .with_piece(sq(0, 0), Piece::new(PieceKind::Rook, Side::White))
            .with_piece(sq(0, 3), Piece::new(PieceKind::Pawn, Side::Black));
        let next = apply(&board, Move::new(sq(0, 0), sq(0, 3)));

        assert_eq!(next.piece_count(Side::Black), 0);
        assert_eq!(
            next.get_piece(sq(0, 3)),
            Some(Piece::new(PieceKind::Rook, Side::White))
        );
        assert_eq!(board.piece_count(Side::Black), 1);
    }

    #[test]
    fn test_apply_from_empty_square_is_noop() {
        let board = Board::new();
        assert_eq!(board.apply(Move::new(sq(4, 4), sq(3, 4))), board);
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert_eq!(sq(0, 0).offset(-1, 0), None);
        assert_eq!(sq(7, 7).offset(0, 1), None);
        assert_eq!(sq(3, 3).offset(2, -1), Some(sq(5, 2)));
        assert_eq!(Square::all().count(), 64);
        assert_eq!(sq(6, 4).to_string(), "e2");
        assert_eq!(sq(0, 0).to_string(), "a8");
    }

    #[test]
    fn test_square_serde_rejects_off_board() {
        let json = serde_json::to_string(&sq(6, 4)).unwrap();
        assert_eq!(json, "[6,4]");
        assert_eq!(serde_json::from_str::<Square>(&json).unwrap(), sq(6, 4));
        assert!(serde_json::from_str::<Square>("[8,1]").is_err());
    }

    #[test]
    fn test_mirrored_swaps_sides() {
        let board = Board::new();
        assert_eq!(board.mirrored(), board);

        let lone = Board::empty().with_piece(sq(5, 2), Piece::new(PieceKind::Knight, Side::White));
        let mirrored = lone.mirrored();
        assert_eq!(
            mirrored.get_piece(sq(2, 2)),
            Some(Piece::new(PieceKind::Knight, Side::Black))
        );
        assert_eq!(mirrored.mirrored(), lone);
    }
}
