//! Centralized error types for the engine.
//!
//! Everything inside the turn engine is local and recoverable: a blocked move
//! skips the entity, a failed search holds the tracer, queue misuse is a
//! no-op. The types here cover the only real failure domain, stage loading.

use std::io;

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Stage parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No playable stages in {0}")]
    NoStages(String),
}

/// Error type for stage parsing operations.
///
/// A stage block that produces one of these is skipped entirely; the loader
/// itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Invalid stage header: {0}")]
    InvalidHeader(String),

    #[error("Invalid number in field {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("MAP_START not found for stage {0}")]
    MissingMap(u32),

    #[error("Unexpected end of input inside a stage block")]
    UnexpectedEof,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
