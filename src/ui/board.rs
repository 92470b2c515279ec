use chess_core::engine::Move;
use chess_core::logic::board::{Board, Piece, Square, BOARD_SIZE};
use std::fmt::Write;

/// Text grid with rank 8 at the top. The squares of `last` are bracketed.
pub fn render_board(board: &Board, last: Option<Move>) -> String {
    let mut out = String::new();

    for rank in 0..BOARD_SIZE {
        let _ = write!(out, "{} ", BOARD_SIZE - rank);
        for file in 0..BOARD_SIZE {
            let Some(square) = Square::new(rank, file) else {
                continue;
            };
            let symbol = board.get_piece(square).map_or('.', Piece::symbol);
            let marked = last.is_some_and(|mv| mv.from == square || mv.to == square);
            if marked {
                let _ = write!(out, "[{symbol}]");
            } else {
                let _ = write!(out, " {symbol} ");
            }
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h");
    out
}
