use crate::engine::config::EngineConfig;
use crate::engine::eval::{evaluator_for, PositionalEvaluator};
use crate::engine::{Algorithm, Evaluator, Move, SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use std::sync::Arc;
use std::time::Instant;

/// Fixed-depth game-tree search. White maximizes, Black minimizes, and every
/// child node owns its own copy of the board.
pub struct SearchEngine<E: Evaluator = PositionalEvaluator> {
    config: Arc<EngineConfig>,
    evaluator: E,
    generator: MoveGenerator,
    nodes_searched: u64,
}

impl SearchEngine<PositionalEvaluator> {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let evaluator = PositionalEvaluator::new(Arc::clone(&config));
        Self::with_evaluator(config, evaluator)
    }
}

impl SearchEngine<Box<dyn Evaluator + Send>> {
    /// Engine using whichever evaluator `config.evaluator` selects.
    #[must_use]
    pub fn from_config(config: Arc<EngineConfig>) -> Self {
        let evaluator = evaluator_for(&config);
        Self::with_evaluator(config, evaluator)
    }
}

impl<E: Evaluator> SearchEngine<E> {
    #[must_use]
    pub const fn with_evaluator(config: Arc<EngineConfig>, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            generator: MoveGenerator::new(),
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nodes visited since the last top-level search started.
    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Runs `algorithm` from the root for `side`.
    pub fn search_with(
        &mut self,
        algorithm: Algorithm,
        board: &Board,
        side: Side,
        depth: u8,
    ) -> (SearchResult, SearchStats) {
        self.nodes_searched = 0;
        let start = Instant::now();

        let maximizing = side.is_maximizing();
        let result = match algorithm {
            Algorithm::Minimax => self.minimax(board, depth, maximizing),
            Algorithm::AlphaBeta => self.alpha_beta(board, depth, i32::MIN, i32::MAX, maximizing),
        };

        let elapsed = start.elapsed();
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        };

        log::debug!(
            "{algorithm} depth {depth} for {side}: score {} move {} nodes {} in {:?}",
            result.score,
            result
                .best_move
                .map_or_else(|| "none".to_string(), |mv| mv.to_string()),
            stats.nodes,
            elapsed
        );

        (result, stats)
    }

    /// Plain Minimax. Ties keep the first move in generation order.
    pub fn minimax(&mut self, board: &Board, depth: u8, maximizing: bool) -> SearchResult {
        self.nodes_searched += 1;

        if depth == 0 {
            return SearchResult::leaf(self.evaluator.evaluate(board));
        }

        let side = if maximizing { Side::White } else { Side::Black };
        let moves = self.generator.generate_moves(board, side);
        if moves.is_empty() {
            return SearchResult::leaf(self.evaluator.evaluate(board));
        }

        let mut best: Option<(i32, Move)> = None;
        for mv in moves {
            let child = board.apply(mv);
            let score = self.minimax(&child, depth - 1, !maximizing).score;
            if improves_on(best, score, maximizing) {
                best = Some((score, mv));
            }
        }

        into_result(best)
    }

    /// Minimax with alpha-beta cut-offs. Returns the same root score as
    /// [`Self::minimax`] for the full window `(i32::MIN, i32::MAX)`.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes_searched += 1;

        if depth == 0 {
            return SearchResult::leaf(self.evaluator.evaluate(board));
        }

        let side = if maximizing { Side::White } else { Side::Black };
        let moves = self.generator.generate_moves(board, side);
        if moves.is_empty() {
            return SearchResult::leaf(self.evaluator.evaluate(board));
        }

        let mut best: Option<(i32, Move)> = None;
        for mv in moves {
            let child = board.apply(mv);
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing).score;
            if improves_on(best, score, maximizing) {
                best = Some((score, mv));
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        into_result(best)
    }
}

/// Strict comparison, so the earliest move keeps a tie.
const fn improves_on(best: Option<(i32, Move)>, score: i32, maximizing: bool) -> bool {
    match best {
        None => true,
        Some((best_score, _)) if maximizing => score > best_score,
        Some((best_score, _)) => score < best_score,
    }
}

fn into_result(best: Option<(i32, Move)>) -> SearchResult {
    best.map_or(SearchResult::leaf(0), |(score, mv)| SearchResult {
        score,
        best_move: Some(mv),
    })
}

impl<E: Evaluator> Searcher for SearchEngine<E> {
    fn search(&mut self, board: &Board, side: Side, depth: u8) -> (SearchResult, SearchStats) {
        let algorithm = self.config.algorithm;
        self.search_with(algorithm, board, side, depth)
    }
}

/// Best move for `side` at `depth` plies using alpha-beta and the default
/// evaluator. `None` when `side` has nothing to play.
#[must_use]
pub fn choose_move(board: &Board, side: Side, depth: u8) -> Option<Move> {
    let mut engine = SearchEngine::new(Arc::new(EngineConfig::default()));
    engine
        .search_with(Algorithm::AlphaBeta, board, side, depth)
        .0
        .best_move
}
