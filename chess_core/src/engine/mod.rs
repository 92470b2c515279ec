use crate::logic::board::{Board, Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod random;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Score of a searched position (positive favours White) and the move
/// reaching it. `best_move` is `None` at the horizon and when the side to
/// move has nothing to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Move>,
}

impl SearchResult {
    #[must_use]
    pub const fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimax => f.write_str("minimax"),
            Self::AlphaBeta => f.write_str("alpha-beta"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

impl<T: Evaluator + ?Sized> Evaluator for Box<T> {
    fn evaluate(&self, board: &Board) -> i32 {
        (**self).evaluate(board)
    }
}

pub trait Searcher {
    fn search(&mut self, board: &Board, side: Side, depth: u8) -> (SearchResult, SearchStats);
}
