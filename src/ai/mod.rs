//! Computer players: the [`Agent`] seam, minimax search with alpha-beta
//! pruning, and a uniformly random baseline.

mod agent;
mod minimax;
mod random;

pub use agent::{Agent, Decision};
pub use minimax::{Minimax, MinimaxAgent, SearchResult, SearchStats};
pub use random::RandomAgent;
