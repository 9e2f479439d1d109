//! Area error types.

use thiserror::Error;

/// Malformed input: a persisted record, a flag identifier or an area name.
///
/// Raised while constructing or deserializing areas, never while evaluating them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Flag identifier not in the catalog.
    #[error("unknown area flag: {0}")]
    UnknownFlag(String),

    /// Sub-flag identifier not in the catalog.
    #[error("unknown area sub-flag: {0}")]
    UnknownSubFlag(String),

    /// World name the host could not resolve.
    #[error("world '{0}' not loaded")]
    UnknownWorld(String),

    /// Area name outside `[A-Za-z0-9_]{2,}`.
    #[error("invalid area name: {0:?}")]
    InvalidName(String),

    /// A bounds axis with `min > max`.
    #[error("invalid bounds on {axis} axis: min {min} > max {max}")]
    InvalidBounds {
        axis: char,
        min: i32,
        max: i32,
    },

    /// Record is not valid JSON or lacks a required key.
    #[error("malformed area record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Area registry error type.
#[derive(Debug, Error)]
pub enum AreaError {
    /// No area registered under this name.
    #[error("area '{0}' not found")]
    NotFound(String),

    /// An area with this name (case-insensitive) is already registered.
    #[error("area '{0}' already exists")]
    Duplicate(String),

    /// Malformed input.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Persistence read or write failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for area operations.
pub type AreaResult<T> = Result<T, AreaError>;
