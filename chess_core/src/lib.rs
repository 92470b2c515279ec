pub mod engine;
pub mod logic;
pub mod worker;

pub use engine::search::choose_move;
pub use engine::{Move, SearchResult};
pub use logic::board::{apply, initial_position, Board, Piece, PieceKind, Side, Square};
pub use logic::generator::legal_moves;
pub use logic::rules::kings_present;
pub use engine::eval::evaluate;
