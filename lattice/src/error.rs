//! Error types for the lattice engine.

use thiserror::Error;

/// Errors reported by the engine. None of them are fatal: callers log the
/// error and keep their previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    /// Rule number was not an integer in `0..=255`.
    #[error("invalid rule number: {0}")]
    InvalidRuleNumber(String),

    /// Lattice width was not an integer in the configured range.
    #[error("invalid lattice size: {0}")]
    InvalidLatticeSize(String),

    /// Iteration target was not an integer in the configured range.
    #[error("invalid iteration count: {0}")]
    InvalidIterationCount(String),

    /// Hidden buffer size was not an integer in the configured range.
    #[error("invalid buffer size: {0}")]
    InvalidBufferSize(String),

    /// A write addressed a cell outside the grid.
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBoundsWrite {
        /// Row of the rejected write.
        row: i64,
        /// Column of the rejected write.
        col: i64,
        /// Grid height at the time of the write.
        height: usize,
        /// Grid width at the time of the write.
        width: usize,
    },

    /// No preset with that name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A sequential update order was not a permutation of the row's columns.
    #[error("update order is not a permutation of 0..{0}")]
    InvalidUpdateOrder(usize),

    /// Configuration could not be read or failed validation.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LatticeError>;
