// error.rs - Error types shared by every part of the simulator.

use thiserror::Error;

/// Errors raised by the grid model, the snapshot gateway and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// A position outside the grid was read or written. Callers are expected
    /// to check bounds first, so this is a precondition violation.
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// No stored snapshot carries the requested id
    #[error("no snapshot with id {0:?}")]
    NotFound(String),

    /// The snapshot store could not be reached or answered with garbage
    #[error("snapshot store error: {0}")]
    Transport(String),

    /// A board replacement would change the fixed dimensions
    #[error("grid is {found:?} but {expected:?} (width, height) was expected")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for simulator operations
pub type LifeResult<T> = Result<T, LifeError>;

impl LifeError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<std::io::Error> for LifeError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for LifeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("malformed record: {err}"))
    }
}
