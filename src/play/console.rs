use std::fmt;
use std::io::{BufRead, Write};

use log::info;

use crate::ai::Agent;
use crate::error::PlayError;
use crate::game::{Board, GameOutcome, Player};

use super::input::{parse_command, Command};

/// How a human-versus-computer match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HumanWin,
    ComputerWin,
    Draw,
    /// The human quit (or input ended) before the game was decided.
    Quit,
}

impl MatchOutcome {
    /// Outcome for `human` of a game that ended in `result`. A game that
    /// never ended counts as quit.
    pub fn for_human(result: Option<GameOutcome>, human: Player) -> Self {
        match result {
            Some(GameOutcome::Winner(player)) if player == human => MatchOutcome::HumanWin,
            Some(GameOutcome::Winner(_)) => MatchOutcome::ComputerWin,
            Some(GameOutcome::Draw) => MatchOutcome::Draw,
            None => MatchOutcome::Quit,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MatchOutcome::HumanWin => "Congratulations! You won!",
            MatchOutcome::ComputerWin => "Computer won.",
            MatchOutcome::Draw => "It's a draw!",
            MatchOutcome::Quit => "Game abandoned.",
        };
        f.write_str(text)
    }
}

/// Final result of a match with every column played, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub moves: Vec<usize>,
}

impl MatchReport {
    /// Moves as a comma-separated list, e.g. `3,0,2`.
    pub fn moves_line(&self) -> String {
        self.moves
            .iter()
            .map(|column| column.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Line-based match between a human on `input`/`output` and an [`Agent`].
pub struct ConsoleMatch<A: Agent> {
    board: Board,
    computer: A,
    human: Player,
}

impl<A: Agent> ConsoleMatch<A> {
    pub fn new(board: Board, computer: A, human: Player) -> Self {
        ConsoleMatch {
            board,
            computer,
            human,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play until someone wins, the board fills, or the human quits.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<MatchReport, PlayError> {
        let mut lines = input.lines();
        let mut moves = Vec::new();

        loop {
            write!(output, "{}", self.board)?;

            if let Some(result) = self.board.outcome() {
                let outcome = MatchOutcome::for_human(Some(result), self.human);
                writeln!(output, "{outcome}")?;
                info!("match finished after {} moves: {:?}", moves.len(), outcome);
                return Ok(MatchReport { outcome, moves });
            }

            let column = if self.board.current_turn() == self.human {
                let command = loop {
                    write!(output, ">>> ")?;
                    output.flush()?;

                    let Some(line) = lines.next() else {
                        break Command::Quit;
                    };
                    match parse_command(&line?, &self.board) {
                        Ok(command) => break command,
                        Err(err) => writeln!(output, "{err}")?,
                    }
                };

                match command {
                    Command::Drop(column) => column,
                    Command::Quit => {
                        writeln!(output, "{}", MatchOutcome::Quit)?;
                        return Ok(MatchReport {
                            outcome: MatchOutcome::Quit,
                            moves,
                        });
                    }
                }
            } else {
                let decision = self.computer.select_action(&mut self.board)?;
                if decision.random {
                    writeln!(output, "(random)")?;
                }
                writeln!(
                    output,
                    "{} moved in column {}.",
                    self.computer.name(),
                    decision.column
                )?;
                decision.column
            };

            self.board.apply_move(column)?;
            moves.push(column);
        }
    }
}
