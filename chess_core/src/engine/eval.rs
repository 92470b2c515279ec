use crate::engine::config::{EngineConfig, EvaluatorKind};
use crate::engine::Evaluator;
use crate::logic::board::{Board, PieceKind, Side};
use crate::logic::eval_constants::{get_pst_value, get_unit_value};
use std::sync::Arc;

/// Material on the centipawn scale, pawn and knight tables, and a penalty
/// for isolated pawns.
pub struct PositionalEvaluator {
    config: Arc<EngineConfig>,
}

impl PositionalEvaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Default for PositionalEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

/// Bit `f` set when `side` has a pawn somewhere on file `f`.
fn pawn_files(board: &Board, side: Side) -> u8 {
    board
        .pieces()
        .filter(|(_, p)| p.kind == PieceKind::Pawn && p.side == side)
        .fold(0, |files, (sq, _)| files | (1 << sq.file()))
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let files = [pawn_files(board, Side::White), pawn_files(board, Side::Black)];
        let mut score = 0;

        for (sq, piece) in board.pieces() {
            let mut value = self.config.piece_value(piece.kind)
                + get_pst_value(piece.kind, piece.side, sq);

            if piece.kind == PieceKind::Pawn {
                let own = files.get(piece.side.index()).copied().unwrap_or(0);
                let bit = 1u8 << sq.file();
                let neighbours = (bit << 1) | (bit >> 1);
                if own & neighbours == 0 {
                    value -= self.config.isolated_pawn_penalty;
                }
            }

            match piece.side {
                Side::White => score += value,
                Side::Black => score -= value,
            }
        }

        score
    }
}

/// Unit-scale material count, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| match piece.side {
                Side::White => get_unit_value(piece.kind),
                Side::Black => -get_unit_value(piece.kind),
            })
            .sum()
    }
}

/// The evaluator named by `config.evaluator`.
#[must_use]
pub fn evaluator_for(config: &Arc<EngineConfig>) -> Box<dyn Evaluator + Send> {
    match config.evaluator {
        EvaluatorKind::Positional => Box::new(PositionalEvaluator::new(Arc::clone(config))),
        EvaluatorKind::Material => Box::new(MaterialEvaluator),
    }
}

/// Static score of `board` with the default positional evaluator.
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    PositionalEvaluator::default().evaluate(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, Square};

    fn sq(rank: u8, file: u8) -> Square {
        Square::new(rank, file).unwrap()
    }

    #[test]
    fn test_initial_position_is_balanced() {
        assert_eq!(evaluate(&Board::new()), 0);
        assert_eq!(MaterialEvaluator.evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_material_and_tables() {
        // Knight on d4 (rank 4, file 3): 320 + 20.
        let board = Board::empty().with_piece(sq(4, 3), Piece::new(PieceKind::Knight, Side::White));
        assert_eq!(evaluate(&board), 340);

        // Queens and kings carry no table bonus; kings no material either.
        let board = Board::empty()
            .with_piece(sq(7, 4), Piece::new(PieceKind::King, Side::White))
            .with_piece(sq(0, 3), Piece::new(PieceKind::Queen, Side::Black));
        assert_eq!(evaluate(&board), -900);
        assert_eq!(MaterialEvaluator.evaluate(&board), -9);
    }

    #[test]
    fn test_isolated_pawn_penalty() {
        // Lone White pawn on e4: 100 + 20 - 10.
        let lone = Board::empty().with_piece(sq(4, 4), Piece::new(PieceKind::Pawn, Side::White));
        assert_eq!(evaluate(&lone), 110);

        // A friendly pawn on the d-file, even ranks away, removes the penalty
        // for both.
        let supported = lone.with_piece(sq(6, 3), Piece::new(PieceKind::Pawn, Side::White));
        assert_eq!(evaluate(&supported), 120 + 80);

        // An enemy pawn next door does not count as support.
        let enemy = lone.with_piece(sq(1, 3), Piece::new(PieceKind::Pawn, Side::Black));
        let black_pawn = 100 + get_pst_value(PieceKind::Pawn, Side::Black, sq(1, 3)) - 10;
        assert_eq!(evaluate(&enemy), 110 - black_pawn);
    }

    #[test]
    fn test_mirror_negates_score() {
        let board = Board::from_placement("r1bqkb1r/pp3ppp/2n2n2/3pp3/4P3/2N2N2/PPPP1PPP/R1BQKB1R")
            .unwrap()
            .with_piece(sq(5, 0), Piece::new(PieceKind::Pawn, Side::White));
        let score = evaluate(&board);
        assert_ne!(score, 0);
        assert_eq!(evaluate(&board.mirrored()), -score);
    }

    #[test]
    fn test_config_values_are_used() {
        let config = Arc::new(EngineConfig {
            val_knight: 300,
            isolated_pawn_penalty: 0,
            ..EngineConfig::default()
        });
        let evaluator = evaluator_for(&config);
        let board = Board::empty()
            .with_piece(sq(4, 3), Piece::new(PieceKind::Knight, Side::White))
            .with_piece(sq(4, 4), Piece::new(PieceKind::Pawn, Side::White));
        assert_eq!(evaluator.evaluate(&board), 300 + 20 + 100 + 20);

        let material = evaluator_for(&Arc::new(EngineConfig {
            evaluator: EvaluatorKind::Material,
            ..EngineConfig::default()
        }));
        assert_eq!(material.evaluate(&board), 4);
    }
}
