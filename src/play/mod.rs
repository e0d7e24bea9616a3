//! Human-versus-computer orchestration for line-based terminals: prompt
//! parsing and the match loop.

mod console;
mod input;

pub use console::{ConsoleMatch, MatchOutcome, MatchReport};
pub use input::{parse_command, Command, QUIT_TOKENS};
