use std::path::PathBuf;

/// Errors raised by [`Board`](crate::game::Board) mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("illegal move: column {column} is full or out of range")]
    IllegalMove { column: usize },

    #[error("illegal undo: column {column} has no piece to remove")]
    IllegalUndo { column: usize },

    #[error("no legal moves left on the board")]
    NoLegalMoves,
}

/// Rejected human input. Recovered by re-prompting, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{0}' is not a column number")]
    NotANumber(String),

    #[error("column {column} is not available (choose one of {available:?})")]
    Unavailable {
        column: usize,
        available: Vec<usize>,
    },
}

/// Errors that end an interactive match early.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
