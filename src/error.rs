use std::path::PathBuf;

use crate::game::{BoardError, Color, Move, MoveError};

/// Errors that can occur while talking to the game manager.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game manager closed the stream while waiting for {0}")]
    UnexpectedEof(&'static str),

    #[error("malformed handshake '{line}': {reason}")]
    Handshake { line: String, reason: String },

    #[error("malformed status line '{0}'")]
    Status(String),

    #[error("malformed board line: {0}")]
    BoardSyntax(String),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("no legal move for {}", .0.name())]
    NoLegalMove(Color),
}

/// Errors that can occur while playing a local match.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("{agent} played illegal move {mv} ({reason:?})")]
    IllegalMove {
        agent: String,
        mv: Move,
        reason: MoveError,
    },

    #[error("{agent} returned no move (legal: {legal:?})")]
    MissingMove { agent: String, legal: Vec<Move> },
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
