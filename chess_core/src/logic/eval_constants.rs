use crate::logic::board::{PieceKind, Side, Square, BOARD_SIZE};

// Piece Values (centipawns). The King carries no material: losing it ends
// the game outright.
pub const VAL_PAWN: i32 = 100;
pub const VAL_KNIGHT: i32 = 320;
pub const VAL_BISHOP: i32 = 330;
pub const VAL_ROOK: i32 = 500;
pub const VAL_QUEEN: i32 = 900;
pub const VAL_KING: i32 = 0;

// Unit scale for the material-only evaluator.
pub const UNIT_PAWN: i32 = 1;
pub const UNIT_KNIGHT: i32 = 3;
pub const UNIT_BISHOP: i32 = 3;
pub const UNIT_ROOK: i32 = 5;
pub const UNIT_QUEEN: i32 = 9;
pub const UNIT_KING: i32 = 0;

pub const ISOLATED_PAWN_PENALTY: i32 = 10;

// Piece-Square Tables, White's point of view.
// Row index is the rank index: row 0 is Black's back rank, row 7 White's.
// Black reads row 7 - rank.

#[rustfmt::skip]
pub const PST_PAWN: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50], // One step from the last rank
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5], // Starting rank
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
pub const PST_KNIGHT: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[must_use]
pub const fn get_unit_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => UNIT_PAWN,
        PieceKind::Knight => UNIT_KNIGHT,
        PieceKind::Bishop => UNIT_BISHOP,
        PieceKind::Rook => UNIT_ROOK,
        PieceKind::Queen => UNIT_QUEEN,
        PieceKind::King => UNIT_KING,
    }
}

/// Positional bonus for `kind` of `side` standing on `square`, unsigned.
/// Only pawns and knights have tables.
#[must_use]
pub fn get_pst_value(kind: PieceKind, side: Side, square: Square) -> i32 {
    let table = match kind {
        PieceKind::Pawn => &PST_PAWN,
        PieceKind::Knight => &PST_KNIGHT,
        _ => return 0,
    };
    let row = match side {
        Side::White => square.rank(),
        Side::Black => BOARD_SIZE - 1 - square.rank(),
    };
    table
        .get(usize::from(row))
        .and_then(|r| r.get(usize::from(square.file())))
        .copied()
        .unwrap_or(0)
}
