use crate::error::BoardError;
use crate::game::{Board, Score};

/// A column chosen by an agent, with how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    /// Value the search guarantees for this move, if a search produced it.
    pub score: Option<Score>,
    /// True when the column was drawn uniformly at random.
    pub random: bool,
}

/// Universal interface for computer players.
pub trait Agent {
    /// Pick a column for the player whose turn it is.
    ///
    /// The board is borrowed mutably so searches can play moves in place;
    /// it must be returned in the state it was received in.
    fn select_action(&mut self, board: &mut Board) -> Result<Decision, BoardError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
