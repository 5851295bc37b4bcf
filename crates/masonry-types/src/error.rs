//! Error types for the masonry board.

use std::io;

use crate::id::CardId;

/// Errors produced by the board model, configuration loading and the bake tool.
///
/// The span engine itself never returns these: a missing card or column is a
/// silent no-op there.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    #[error("column not found: {0}")]
    ColumnNotFound(usize),

    #[error("config error: {0}")]
    Config(String),

    #[error("content plan error: {0}")]
    Plan(String),

    #[error("HTML error: {0}")]
    Html(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BoardError>;
