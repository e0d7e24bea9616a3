use crate::error::InputError;
use crate::game::Board;

/// Tokens that end the match from the prompt.
pub const QUIT_TOKENS: [&str; 3] = ["q", "quit", "c"];

/// A parsed line of human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Drop(usize),
    Quit,
}

/// Parse a prompt line against the current board.
///
/// Accepts a 0-based column that is still available, or a quit token.
pub fn parse_command(line: &str, board: &Board) -> Result<Command, InputError> {
    let token = line.trim();
    let quit = QUIT_TOKENS.iter().any(|t| token.eq_ignore_ascii_case(t));
    if quit {
        return Ok(Command::Quit);
    }

    let column: usize = token
        .parse()
        .map_err(|_| InputError::NotANumber(token.to_string()))?;

    if !board.is_available(column) {
        return Err(InputError::Unavailable {
            column,
            available: board.available_cols().iter().copied().collect(),
        });
    }

    Ok(Command::Drop(column))
}
