//! Core game logic: the in-place board with move/undo, line scanning and
//! position evaluation, the two players, and the ordered [`Score`] type.

mod board;
mod player;
mod score;

pub use board::{Board, Cell, GameOutcome, DEFAULT_COLS, DEFAULT_ROWS, DIRECTIONS, WIN_LENGTH};
pub use player::Player;
pub use score::Score;

#[cfg(test)]
pub(crate) use board::DRAW_SEQUENCE;
