use std::collections::BTreeSet;
use std::fmt;

use super::{Player, Score};
use crate::error::BoardError;

pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;

/// Pieces in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// Scan directions as (column step, row step), rows counted from the bottom.
/// Together with the origin cell they cover each line exactly once.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 1), (0, 1), (1, 1), (1, 0)];

/// Heuristic weight of an open run, indexed by its length.
const LINE_WEIGHTS: [i32; WIN_LENGTH] = [0, 0, 3, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A gravity grid of `width` columns by `height` rows.
///
/// The board is mutated in place: [`Board::apply_move`] and
/// [`Board::undo_move`] are exact inverses, which lets the search walk the
/// game tree on a single instance instead of cloning per branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Column-major, row 0 at the bottom.
    cells: Vec<Cell>,
    piles: Vec<usize>,
    available: BTreeSet<usize>,
    current_turn: Player,
    turns_left: usize,
}

impl Board {
    /// Create an empty board. Red moves first.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            piles: vec![0; width],
            available: if height > 0 {
                (0..width).collect()
            } else {
                BTreeSet::new()
            },
            current_turn: Player::Red,
            turns_left: width * height,
        }
    }

    /// Build a board by playing `moves` from the empty position.
    pub fn from_moves(width: usize, height: usize, moves: &[usize]) -> Result<Self, BoardError> {
        let mut board = Board::new(width, height);
        for &column in moves {
            board.apply_move(column)?;
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn turns_left(&self) -> usize {
        self.turns_left
    }

    /// Number of pieces stacked in `column`, `None` outside the grid.
    pub fn pile_height(&self, column: usize) -> Option<usize> {
        self.piles.get(column).copied()
    }

    /// Columns that still accept a piece, in ascending order.
    pub fn available_cols(&self) -> &BTreeSet<usize> {
        &self.available
    }

    pub fn is_available(&self, column: usize) -> bool {
        self.available.contains(&column)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.available.is_empty()
    }

    /// Get the cell at (column, row), row 0 being the bottom.
    /// Returns `None` outside the grid.
    pub fn cell_at(&self, column: usize, row: usize) -> Option<Cell> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[self.index(column, row)])
    }

    fn cell_at_signed(&self, column: isize, row: isize) -> Option<Cell> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        self.cell_at(column, row)
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column * self.height + row
    }

    /// Drop the current player's piece into `column`.
    pub fn apply_move(&mut self, column: usize) -> Result<(), BoardError> {
        if !self.available.contains(&column) {
            return Err(BoardError::IllegalMove { column });
        }

        let row = self.piles[column];
        let idx = self.index(column, row);
        self.cells[idx] = self.current_turn.to_cell();
        self.piles[column] = row + 1;
        if row + 1 == self.height {
            self.available.remove(&column);
        }
        self.current_turn = self.current_turn.other();
        self.turns_left -= 1;

        Ok(())
    }

    /// Take the top piece off `column`, restoring the state before the
    /// matching [`apply_move`](Self::apply_move).
    pub fn undo_move(&mut self, column: usize) -> Result<(), BoardError> {
        let row = match self.piles.get(column) {
            Some(&pile) if pile > 0 => pile - 1,
            _ => return Err(BoardError::IllegalUndo { column }),
        };

        let idx = self.index(column, row);
        self.cells[idx] = Cell::Empty;
        self.piles[column] = row;
        self.available.insert(column);
        self.current_turn = self.current_turn.other();
        self.turns_left += 1;

        Ok(())
    }

    /// Length of the run starting at `origin` (column, row) and walking
    /// `WIN_LENGTH - 1` further cells along `direction`.
    ///
    /// Cells owned by the origin's player extend the run and empty cells are
    /// skipped over. Leaving the grid or meeting the opponent voids the whole
    /// run and yields 0, so only lines that can still become four score.
    /// An empty or off-grid origin also yields 0.
    pub fn line_run_length(&self, origin: (usize, usize), direction: (isize, isize)) -> usize {
        let owner = match self.cell_at(origin.0, origin.1) {
            Some(cell) if cell != Cell::Empty => cell,
            _ => return 0,
        };

        let mut column = origin.0 as isize;
        let mut row = origin.1 as isize;
        let mut length = 1;

        for _ in 1..WIN_LENGTH {
            column += direction.0;
            row += direction.1;

            match self.cell_at_signed(column, row) {
                Some(cell) if cell == owner => length += 1,
                Some(Cell::Empty) => {}
                Some(_) | None => return 0,
            }
        }

        length
    }

    /// Score the position from Red's point of view.
    ///
    /// A completed line gives a terminal score for its owner with magnitude
    /// `turns_left + 1`. Otherwise every run from every occupied cell adds
    /// its weight to its owner's total and the result is Red minus Yellow.
    pub fn evaluate_state(&self) -> Score {
        let mut red = 0;
        let mut yellow = 0;

        for column in 0..self.width {
            for row in 0..self.piles[column] {
                let Some(owner) = self.cells[self.index(column, row)].owner() else {
                    continue;
                };

                for &direction in &DIRECTIONS {
                    let length = self.line_run_length((column, row), direction);
                    if length == WIN_LENGTH {
                        return Score::win(owner, self.turns_left);
                    }

                    let weight = LINE_WEIGHTS[length];
                    match owner {
                        Player::Red => red += weight,
                        Player::Yellow => yellow += weight,
                    }
                }
            }
        }

        Score::heuristic(red - yellow)
    }

    /// Winner or draw, `None` while the game is still open.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = self.evaluate_state().winner() {
            Some(GameOutcome::Winner(winner))
        } else if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

/// Fills a 7x6 board with no four in a row anywhere.
#[cfg(test)]
pub(crate) const DRAW_SEQUENCE: [usize; 42] = [
    0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 4, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 5, 5,
    5, 5, 5, 6, 6, 6, 6, 6, 6, 5,
];

/// ASCII rendering: Red as `□`, Yellow as `■`, top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "_".repeat(self.width + 2);
        writeln!(f, "{rule}")?;
        for row in (0..self.height).rev() {
            write!(f, "|")?;
            for column in 0..self.width {
                let symbol = match self.cells[self.index(column, row)] {
                    Cell::Empty => ' ',
                    Cell::Red => '□',
                    Cell::Yellow => '■',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{rule}")?;

        if self.width <= 10 {
            let labels: String = (0..self.width).map(|c| c.to_string()).collect();
            writeln!(f, "|{labels}|")?;
            writeln!(f, "{}", "‾".repeat(self.width + 2))?;
        }
        Ok(())
    }
}
