use crate::engine::Move;
use crate::logic::board::{Board, Piece, PieceKind, Side, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Pseudo-legal move generation. Moves that leave the mover's own King
/// attacked are still generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Every move for `turn`, squares in rank/file order, each piece's
    /// directions in a fixed order, nearer ray squares first.
    pub fn generate_moves(&self, board: &Board, turn: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (from, piece) in board.pieces() {
            if piece.side == turn {
                self.generate_piece_moves(board, from, piece, &mut moves);
            }
        }

        moves
    }

    /// Moves of whatever piece stands on `from`; empty for an empty square.
    pub fn moves_from(&self, board: &Board, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = board.get_piece(from) {
            self.generate_piece_moves(board, from, piece, &mut moves);
        }
        moves
    }

    /// Returns as soon as one move for `turn` is found.
    pub fn has_legal_moves(&self, board: &Board, turn: Side) -> bool {
        let mut scratch = Vec::new();
        board.pieces().any(|(from, piece)| {
            if piece.side != turn {
                return false;
            }
            scratch.clear();
            self.generate_piece_moves(board, from, piece, &mut scratch);
            !scratch.is_empty()
        })
    }

    fn generate_piece_moves(
        &self,
        board: &Board,
        from: Square,
        piece: Piece,
        moves: &mut Vec<Move>,
    ) {
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(board, from, piece.side, moves),
            PieceKind::Knight => {
                self.generate_step_moves(board, from, piece.side, &KNIGHT_OFFSETS, moves);
            }
            PieceKind::Bishop => {
                self.generate_ray_moves(board, from, piece.side, &BISHOP_RAYS, moves);
            }
            PieceKind::Rook => self.generate_ray_moves(board, from, piece.side, &ROOK_RAYS, moves),
            PieceKind::Queen => {
                self.generate_ray_moves(board, from, piece.side, &BISHOP_RAYS, moves);
                self.generate_ray_moves(board, from, piece.side, &ROOK_RAYS, moves);
            }
            PieceKind::King => {
                self.generate_step_moves(board, from, piece.side, &KING_OFFSETS, moves);
            }
        }
    }

    fn generate_pawn_moves(&self, board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        let forward = side.forward();

        if let Some(one) = from.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
            moves.push(Move::new(from, one));

            if from.rank() == side.pawn_start_rank() {
                if let Some(two) = one.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
                    moves.push(Move::new(from, two));
                }
            }
        }

        for df in [-1, 1] {
            let Some(target) = from.offset(forward, df) else {
                continue;
            };
            if board.get_piece(target).is_some_and(|p| p.side != side) {
                moves.push(Move::new(from, target));
            }
        }
    }

    /// Single-step movers: Knight and King.
    fn generate_step_moves(
        &self,
        board: &Board,
        from: Square,
        side: Side,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in offsets {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            if !matches!(board.get_piece(to), Some(p) if p.side == side) {
                moves.push(Move::new(from, to));
            }
        }
    }

    /// Sliders: each ray runs until the edge, a friendly piece (excluded) or
    /// an enemy piece (included).
    fn generate_ray_moves(
        &self,
        board: &Board,
        from: Square,
        side: Side,
        rays: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in rays {
            let mut current = from.offset(dr, df);
            while let Some(to) = current {
                match board.get_piece(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(target) => {
                        if target.side != side {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                current = to.offset(dr, df);
            }
        }
    }
}

/// All pseudo-legal moves for `side`.
#[must_use]
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    MoveGenerator::new().generate_moves(board, side)
}
