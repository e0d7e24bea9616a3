use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BoardError;
use crate::game::Board;

use super::agent::{Agent, Decision};

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniformly random available column of `board`.
pub(crate) fn random_column<R: Rng>(rng: &mut R, board: &Board) -> Result<usize, BoardError> {
    let available = board.available_cols();
    if available.is_empty() {
        return Err(BoardError::NoLegalMoves);
    }
    let idx = rng.random_range(0..available.len());
    available
        .iter()
        .nth(idx)
        .copied()
        .ok_or(BoardError::NoLegalMoves)
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &mut Board) -> Result<Decision, BoardError> {
        let column = random_column(&mut self.rng, board)?;
        Ok(Decision {
            column,
            score: None,
            random: true,
        })
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::with_seed(7);
        let mut board = Board::from_moves(7, 6, &[2, 2, 2, 2, 2, 2]).unwrap();

        for _ in 0..100 {
            let decision = agent.select_action(&mut board).unwrap();
            assert!(
                board.is_available(decision.column),
                "column {} is not legal",
                decision.column
            );
            assert!(decision.random);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent1 = RandomAgent::new();
        let mut agent2 = RandomAgent::new();
        let mut board = Board::default();

        let mut turn = 0;
        while !board.is_terminal() {
            let decision = if turn % 2 == 0 {
                agent1.select_action(&mut board).unwrap()
            } else {
                agent2.select_action(&mut board).unwrap()
            };
            board.apply_move(decision.column).unwrap();
            turn += 1;
        }

        assert!(board.outcome().is_some());
    }

    #[test]
    fn test_random_agent_rejects_full_board() {
        let mut board = Board::new(1, 1);
        board.apply_move(0).unwrap();
        let mut agent = RandomAgent::new();
        assert_eq!(
            agent.select_action(&mut board),
            Err(BoardError::NoLegalMoves)
        );
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
