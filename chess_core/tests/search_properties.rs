use chess_core::engine::config::EngineConfig;
use chess_core::engine::random::RandomMover;
use chess_core::engine::search::SearchEngine;
use chess_core::engine::{Algorithm, Searcher};
use chess_core::logic::board::{Board, Piece, PieceKind, Side, Square};
use chess_core::{apply, choose_move, evaluate, initial_position, legal_moves};
use std::sync::Arc;

fn sq(rank: u8, file: u8) -> Square {
    Square::new(rank, file).expect("square on the board")
}

fn engine() -> SearchEngine {
    SearchEngine::new(Arc::new(EngineConfig::default()))
}

/// Positions reached by seeded random playouts from the opening, paired with
/// the side to move.
fn sampled_positions() -> Vec<(Board, Side)> {
    let mut positions = Vec::new();
    for seed in 0..4 {
        let mut mover = RandomMover::seeded(seed);
        let mut board = initial_position();
        let mut side = Side::White;
        for ply in 0..10 {
            if ply % 3 == 0 {
                positions.push((board, side));
            }
            let Some(mv) = mover.search(&board, side, 1).0.best_move else {
                break;
            };
            board = apply(&board, mv);
            side = side.opposite();
        }
    }
    positions
}

#[test]
fn alpha_beta_matches_minimax() {
    let positions = sampled_positions();
    assert!(positions.len() >= 12);

    for (board, side) in positions {
        for depth in 1..=3 {
            let (plain, plain_stats) =
                engine().search_with(Algorithm::Minimax, &board, side, depth);
            let (pruned, pruned_stats) =
                engine().search_with(Algorithm::AlphaBeta, &board, side, depth);

            assert_eq!(
                plain.score, pruned.score,
                "score mismatch at depth {depth} for {board:?}"
            );
            assert!(
                pruned_stats.nodes <= plain_stats.nodes,
                "alpha-beta visited more nodes at depth {depth} for {board:?}"
            );
        }
    }
}

#[test]
fn evaluation_is_mirror_symmetric() {
    for (board, _) in sampled_positions() {
        assert_eq!(evaluate(&board.mirrored()), -evaluate(&board), "{board:?}");
    }
}

#[test]
fn search_score_is_mirror_symmetric() {
    for (board, side) in sampled_positions() {
        let (result, _) = engine().search_with(Algorithm::AlphaBeta, &board, side, 2);
        let (mirrored, _) =
            engine().search_with(Algorithm::AlphaBeta, &board.mirrored(), side.opposite(), 2);
        assert_eq!(mirrored.score, -result.score, "{board:?}");
    }
}

#[test]
fn opening_move_at_depth_two() {
    let board = initial_position();
    let mv = choose_move(&board, Side::White, 2).expect("White has moves in the opening");

    let piece = board.get_piece(mv.from).expect("move starts on a White piece");
    assert_eq!(piece.side, Side::White);
    assert!(matches!(piece.kind, PieceKind::Pawn | PieceKind::Knight));
    assert!(legal_moves(&board, Side::White).contains(&mv));

    let after = apply(&board, mv);
    assert_eq!(after.piece_count(Side::White), 16);
    assert_eq!(after.piece_count(Side::Black), 16);
}

#[test]
fn lone_king_still_moves() {
    let board = Board::empty().with_piece(sq(4, 4), Piece::new(PieceKind::King, Side::White));
    let mv = choose_move(&board, Side::White, 2).expect("a free King can step");
    assert_eq!(mv.from, sq(4, 4));

    // Black has nothing at all: a terminal leaf at any depth.
    let mut engine = engine();
    let (result, stats) = engine.search_with(Algorithm::Minimax, &board, Side::Black, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, evaluate(&board));
    assert_eq!(stats.nodes, 1);
}

#[test]
fn walled_in_side_has_no_move() {
    // White King in the corner behind two files of its own stuck pawns.
    let board = Board::from_placement("PP6/PP6/PP6/PP6/PP6/PP6/PP6/KP6").expect("valid placement");
    assert!(legal_moves(&board, Side::White).is_empty());
    assert_eq!(choose_move(&board, Side::White, 3), None);

    let (result, stats) = engine().search_with(Algorithm::Minimax, &board, Side::White, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, evaluate(&board));
    assert_eq!(stats.nodes, 1);
}
