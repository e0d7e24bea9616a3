use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::BoardError;
use crate::game::{Board, Player, Score};

use super::agent::{Agent, Decision};
use super::random::random_column;

/// Result of a search: the value the side to move can guarantee and the
/// column that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` when the node was evaluated without expanding any child.
    pub column: Option<usize>,
}

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, the root included.
    pub nodes: u64,
    /// Times the remaining siblings were skipped because `beta <= alpha`.
    pub cutoffs: u64,
}

/// Minimax search with alpha-beta pruning over a single in-place [`Board`].
///
/// Children are visited in a freshly shuffled order at every node, so among
/// moves of equal value the one returned varies with the RNG. Seed it with
/// [`Minimax::with_seed`] for reproducible choices.
pub struct Minimax {
    rng: StdRng,
    stats: SearchStats,
}

impl Minimax {
    pub fn new() -> Self {
        Minimax {
            rng: StdRng::from_os_rng(),
            stats: SearchStats::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Minimax {
            rng: StdRng::seed_from_u64(seed),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Search the full window from the root.
    pub fn best_move(
        &mut self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
    ) -> Result<SearchResult, BoardError> {
        self.search(
            board,
            depth,
            Score::NEG_INFINITY,
            Score::POS_INFINITY,
            maximizing,
        )
    }

    /// Evaluate `board` `depth` plies deep.
    ///
    /// The maximizing side wants the largest [`Score`] (Red), the other side
    /// the smallest. Every move is undone before returning, so the board
    /// comes back unchanged.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<SearchResult, BoardError> {
        self.stats.nodes += 1;

        let state = board.evaluate_state();
        if depth == 0 || state.is_terminal() || board.is_full() {
            return Ok(SearchResult {
                score: state,
                column: None,
            });
        }

        let mut columns: Vec<usize> = board.available_cols().iter().copied().collect();
        columns.shuffle(&mut self.rng);

        let mut best = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::POS_INFINITY
        };
        let mut best_column = None;

        for column in columns {
            board.apply_move(column)?;
            let child = self.search(board, depth - 1, alpha, beta, !maximizing);
            board.undo_move(column)?;
            let value = child?.score;

            if maximizing {
                if value > best {
                    best = value;
                    best_column = Some(column);
                }
                alpha = alpha.max(value);
            } else {
                if value < best {
                    best = value;
                    best_column = Some(column);
                }
                beta = beta.min(value);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(SearchResult {
            score: best,
            column: best_column,
        })
    }

    /// Uniformly random legal column, for when a search yields no move.
    pub fn random_column(&mut self, board: &Board) -> Result<usize, BoardError> {
        random_column(&mut self.rng, board)
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

/// Computer player driven by [`Minimax`]. Plays whichever side is to move:
/// maximizing as Red, minimizing as Yellow.
pub struct MinimaxAgent {
    depth: usize,
    search: Minimax,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            search: Minimax::new(),
        }
    }

    pub fn with_seed(depth: usize, seed: u64) -> Self {
        MinimaxAgent {
            depth,
            search: Minimax::with_seed(seed),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn stats(&self) -> &SearchStats {
        self.search.stats()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &mut Board) -> Result<Decision, BoardError> {
        if board.is_full() {
            return Err(BoardError::NoLegalMoves);
        }

        let maximizing = board.current_turn() == Player::Red;
        self.search.reset_stats();
        let result = self.search.best_move(board, self.depth, maximizing)?;
        debug!(
            "searched depth {} as {}: {} nodes, {} cutoffs",
            self.depth,
            board.current_turn().name(),
            self.search.stats().nodes,
            self.search.stats().cutoffs
        );

        let decision = match result.column {
            Some(column) => Decision {
                column,
                score: Some(result.score),
                random: false,
            },
            None => Decision {
                column: self.search.random_column(board)?,
                score: None,
                random: true,
            },
        };
        info!(
            "{} picks column {}{} (score {})",
            board.current_turn().name(),
            decision.column,
            if decision.random { " at random" } else { "" },
            result.score
        );
        Ok(decision)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, DRAW_SEQUENCE};

    /// Plain minimax without pruning, as the reference for alpha-beta.
    fn exhaustive(
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        nodes: &mut u64,
    ) -> Score {
        *nodes += 1;
        let state = board.evaluate_state();
        if depth == 0 || state.is_terminal() || board.is_full() {
            return state;
        }
        let columns: Vec<usize> = board.available_cols().iter().copied().collect();
        let mut values = Vec::with_capacity(columns.len());
        for column in columns {
            board.apply_move(column).unwrap();
            values.push(exhaustive(board, depth - 1, !maximizing, nodes));
            board.undo_move(column).unwrap();
        }
        if maximizing {
            values.into_iter().max().unwrap()
        } else {
            values.into_iter().min().unwrap()
        }
    }

    // --- Search tests ---

    #[test]
    fn depth_one_on_empty_board() {
        let mut board = Board::default();
        let mut search = Minimax::with_seed(1);
        let result = search.best_move(&mut board, 1, true).unwrap();
        assert!(!result.score.is_terminal());
        let column = result.column.expect("a move at depth 1");
        assert!(column <= 6);
    }

    #[test]
    fn depth_zero_returns_no_move() {
        let mut board = Board::from_moves(7, 6, &[0, 6, 1]).unwrap();
        let mut search = Minimax::with_seed(1);
        let result = search.best_move(&mut board, 0, true).unwrap();
        assert_eq!(result.column, None);
        assert_eq!(result.score, Score::heuristic(3));
    }

    #[test]
    fn terminal_position_is_not_expanded() {
        let mut board = Board::from_moves(7, 6, &[0, 1, 0, 1, 0, 1, 0]).unwrap();
        let mut search = Minimax::with_seed(1);
        let result = search.best_move(&mut board, 5, false).unwrap();
        assert_eq!(result.column, None);
        assert_eq!(result.score, Score::win(Player::Red, 35));
        assert_eq!(search.stats().nodes, 1);
    }

    #[test]
    fn full_board_is_a_heuristic_leaf() {
        let mut board = Board::from_moves(7, 6, &DRAW_SEQUENCE).unwrap();
        for maximizing in [true, false] {
            let mut search = Minimax::with_seed(1);
            let result = search.best_move(&mut board, 5, maximizing).unwrap();
            assert_eq!(result.score, Score::heuristic(0));
            assert!(!result.score.is_terminal());
            assert_eq!(result.column, None);
            assert_eq!(search.stats().nodes, 1);
        }
    }

    #[test]
    fn search_leaves_board_unchanged() {
        let mut board = Board::from_moves(7, 6, &[3, 3, 2, 4, 4, 3, 1]).unwrap();
        let before = board.clone();
        let mut search = Minimax::with_seed(3);
        search.best_move(&mut board, 4, false).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn alpha_beta_matches_exhaustive_minimax() {
        let positions: [&[usize]; 5] = [
            &[],
            &[3, 3, 2],
            &[3, 3, 2, 4, 4, 3, 1, 0],
            &[0, 0, 1, 1, 2],
            &[6, 0, 6, 1, 5, 2, 4],
        ];
        for (i, moves) in positions.iter().enumerate() {
            let mut board = Board::from_moves(7, 6, moves).unwrap();
            let maximizing = board.current_turn() == Player::Red;
            for depth in 1..=4 {
                let mut full_nodes = 0;
                let expected = exhaustive(&mut board, depth, maximizing, &mut full_nodes);
                for seed in 0..3 {
                    let mut search = Minimax::with_seed(seed + i as u64 * 10);
                    let result = search.best_move(&mut board, depth, maximizing).unwrap();
                    assert_eq!(result.score, expected, "position {moves:?}, depth {depth}");
                    assert!(search.stats().nodes <= full_nodes);
                }
            }
        }
    }

    #[test]
    fn chosen_move_achieves_reported_value() {
        let mut board = Board::from_moves(7, 6, &[3, 3, 2, 4]).unwrap();
        let mut search = Minimax::with_seed(11);
        let result = search.best_move(&mut board, 3, true).unwrap();
        let column = result.column.unwrap();

        board.apply_move(column).unwrap();
        let mut nodes = 0;
        let value = exhaustive(&mut board, 2, false, &mut nodes);
        assert_eq!(value, result.score);
    }

    #[test]
    fn same_seed_same_choice() {
        let mut board = Board::default();
        let mut first = Minimax::with_seed(42);
        let mut second = Minimax::with_seed(42);
        let a = first.best_move(&mut board, 3, true).unwrap();
        let b = second.best_move(&mut board, 3, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pruning_happens() {
        let mut board = Board::from_moves(7, 6, &[3, 3, 2]).unwrap();
        let mut search = Minimax::with_seed(5);
        search.best_move(&mut board, 4, false).unwrap();
        assert!(search.stats().cutoffs > 0);
    }

    #[test]
    fn takes_winning_move() {
        // Red holds the bottom of columns 0..=2, column 3 completes the line
        let mut board = Board::from_moves(7, 6, &[0, 0, 1, 1, 2, 2]).unwrap();
        let mut search = Minimax::with_seed(9);
        let result = search.best_move(&mut board, 4, true).unwrap();
        assert_eq!(result.column, Some(3), "Should take winning move at col 3");
        assert_eq!(result.score, Score::win(Player::Red, 35));
    }

    #[test]
    fn blocks_opponent_win() {
        // Yellow has [0,1,2] at bottom row. Red must play col 3 to block.
        let mut board = Board::from_moves(7, 6, &[6, 0, 6, 1, 5, 2]).unwrap();
        for seed in 0..5 {
            let mut search = Minimax::with_seed(seed);
            let result = search.best_move(&mut board, 4, true).unwrap();
            assert_eq!(
                result.column,
                Some(3),
                "Should block opponent's winning move at col 3"
            );
            assert!(!result.score.is_terminal());
        }
    }

    #[test]
    fn minimizing_side_takes_its_win() {
        // Both sides threaten column 3, Yellow is to move.
        let mut board = Board::from_moves(7, 6, &[6, 0, 6, 1, 5, 2, 4]).unwrap();
        let mut search = Minimax::with_seed(2);
        let result = search.best_move(&mut board, 4, false).unwrap();
        assert_eq!(result.column, Some(3));
        assert_eq!(result.score.winner(), Some(Player::Yellow));
    }

    // --- Agent tests ---

    #[test]
    fn agent_selects_legal_action() {
        let mut agent = MinimaxAgent::with_seed(3, 1);
        let mut board = Board::default();
        let decision = agent.select_action(&mut board).unwrap();
        assert!(board.is_available(decision.column));
        assert!(!decision.random);
        assert!(decision.score.is_some());
    }

    #[test]
    fn agent_falls_back_to_random_at_depth_zero() {
        let mut agent = MinimaxAgent::with_seed(0, 4);
        let mut board = Board::from_moves(7, 6, &[1, 1, 1, 1, 1, 1]).unwrap();
        let decision = agent.select_action(&mut board).unwrap();
        assert!(decision.random);
        assert_eq!(decision.score, None);
        assert!(board.is_available(decision.column));
    }

    #[test]
    fn agent_rejects_full_board() {
        let mut board = Board::new(2, 1);
        board.apply_move(0).unwrap();
        board.apply_move(1).unwrap();
        let mut agent = MinimaxAgent::new(3);
        assert_eq!(
            agent.select_action(&mut board),
            Err(BoardError::NoLegalMoves)
        );
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut agent1 = MinimaxAgent::with_seed(3, 1);
        let mut agent2 = MinimaxAgent::with_seed(3, 2);
        let mut board = Board::default();
        let mut turn = 0;

        while !board.is_terminal() && turn < 42 {
            let decision = if turn % 2 == 0 {
                agent1.select_action(&mut board).unwrap()
            } else {
                agent2.select_action(&mut board).unwrap()
            };
            board.apply_move(decision.column).unwrap();
            turn += 1;
        }

        assert!(board.is_terminal(), "Game should complete");
    }

    #[test]
    fn beats_random_agent() {
        let games_per_color = 10;
        let mut minimax_wins = 0;
        let total = games_per_color * 2;

        for game in 0..total {
            let minimax_side = if game % 2 == 0 {
                Player::Red
            } else {
                Player::Yellow
            };
            let mut minimax = MinimaxAgent::with_seed(3, game as u64);
            let mut random = RandomAgent::with_seed(1000 + game as u64);
            let mut board = Board::default();

            while !board.is_terminal() {
                let decision = if board.current_turn() == minimax_side {
                    minimax.select_action(&mut board).unwrap()
                } else {
                    random.select_action(&mut board).unwrap()
                };
                board.apply_move(decision.column).unwrap();
            }

            if board.outcome() == Some(GameOutcome::Winner(minimax_side)) {
                minimax_wins += 1;
            }
        }

        let win_rate = minimax_wins as f64 / total as f64;
        assert!(
            win_rate > 0.75,
            "Minimax should beat random >75% of the time, got {:.0}% ({minimax_wins}/{total})",
            win_rate * 100.0
        );
    }

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::new(7);
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), 7);
    }
}
