use crate::app::Outcome;
use chess_core::engine::{SearchResult, SearchStats};
use chess_core::logic::board::Side;
use chess_core::logic::game::MoveRecord;

/// `12. White N b1c3 x p  score +35  nodes 1234  5 ms`
pub fn move_line(
    ply: u32,
    record: &MoveRecord,
    result: &SearchResult,
    stats: &SearchStats,
) -> String {
    let capture = record
        .captured
        .map(|piece| format!(" x {}", piece.symbol()))
        .unwrap_or_default();
    format!(
        "{ply}. {} {} {}{capture}  score {:+}  nodes {}  {} ms",
        record.side,
        record.piece.symbol(),
        record.mv,
        result.score,
        stats.nodes,
        stats.time_ms
    )
}

pub fn pass_line(ply: u32, side: Side) -> String {
    format!("{ply}. {side} has no move and passes")
}

pub fn outcome_line(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Won(side) => format!("{side} wins: the {} King was captured", side.opposite()),
        Outcome::Exhausted => "Game over: neither side can move".to_string(),
        Outcome::PlyLimit(plies) => format!("Game stopped after {plies} plies"),
    }
}
