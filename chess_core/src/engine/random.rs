use crate::engine::{SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random pseudo-legal move. Random moves carry no score.
pub struct RandomMover {
    rng: StdRng,
    generator: MoveGenerator,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMover {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            generator: MoveGenerator::new(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            generator: MoveGenerator::new(),
        }
    }
}

impl Searcher for RandomMover {
    fn search(&mut self, board: &Board, side: Side, depth: u8) -> (SearchResult, SearchStats) {
        let moves = self.generator.generate_moves(board, side);
        let best_move = moves.choose(&mut self.rng).copied();
        let stats = SearchStats {
            depth,
            nodes: 1,
            time_ms: 0,
        };
        (SearchResult { score: 0, best_move }, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::generator::legal_moves;

    #[test]
    fn test_seeded_mover_is_reproducible() {
        let board = Board::new();
        let mut first = RandomMover::seeded(7);
        let mut second = RandomMover::seeded(7);

        for _ in 0..10 {
            let (a, _) = first.search(&board, Side::White, 0);
            let (b, _) = second.search(&board, Side::White, 0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::new();
        let mut mover = RandomMover::new();
        let (result, _) = mover.search(&board, Side::Black, 3);
        let mv = result.best_move.unwrap();
        assert!(legal_moves(&board, Side::Black).contains(&mv));
    }

    #[test]
    fn test_no_moves_gives_none() {
        let (result, _) = RandomMover::seeded(1).search(&Board::empty(), Side::White, 1);
        assert_eq!(result.best_move, None);
    }
}
