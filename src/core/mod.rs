pub mod board;
pub mod setup;
pub mod types;

pub use board::{Board, BoardError, MoveRecord, Outcome, TurnStatus};
pub use setup::{parse_position, write_move, ParseError, PositionSnapshot};
pub use types::{Cell, Color, Move, Position, BOARD_SIZE, NUM_CELLS};
