use std::path::PathBuf;

/// Errors returned by the game engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid board size {width}x{height} (width must be between 4 and 50, height 6)")]
    InvalidSize { width: usize, height: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("column {column} is outside a board of width {width}")]
    OutOfRange { column: usize, width: usize },
}

/// Errors produced while turning typed text into a board width or column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid input, please enter a number.")]
    NotANumber(String),

    #[error("Invalid size, please enter a number between {min} and {max}.")]
    SizeOutOfRange { value: i64, min: usize, max: usize },

    #[error("Invalid column number, please enter a valid one (1 to {max}).")]
    ColumnOutOfRange { value: i64, max: usize },
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
