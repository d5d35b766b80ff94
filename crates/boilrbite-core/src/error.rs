//! Error types for BoilrBite.
//!
//! List operations never fail at call time: out-of-range positions and empty
//! batches are silent no-ops. Errors only surface while an adapter is being
//! configured, where a missing required piece must stop construction.

use thiserror::Error;

/// The main error type for BoilrBite operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoilrBiteError {
    /// No content-equality predicate was supplied. It is required to compute
    /// any diff.
    #[error("a content-equality predicate is required to build an adapter")]
    MissingContentPredicate,

    /// The adapter was configured without any row layout.
    #[error("at least one layout id must be registered")]
    NoLayouts,

    /// Signal-related error.
    #[error("signal error: {0}")]
    Signal(#[from] SignalError),
}

/// Signal-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or disconnected connection ID")]
    InvalidConnection,
}

/// A specialized Result type for BoilrBite operations.
pub type Result<T> = std::result::Result<T, BoilrBiteError>;
