//! Shared value type, phase tags, and the fatal error enum.

use std::fmt;

use thiserror::Error;

/// Integer stored in matrix cells; diagonal sums share the same type.
pub type Element = i64;

/// Which half of the two-phase run a worker belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Phase one: compute the diagonal sum and store it.
    Compute,
    /// Phase two: load the stored sum and report it.
    Report,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compute => f.write_str("compute"),
            Phase::Report => f.write_str("report"),
        }
    }
}

/// Errors that abort the run. All of them are fatal; they propagate to
/// `main`, which reports them and exits nonzero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    #[error("{worker} terminated abnormally during the {phase} phase")]
    ConcurrencyFault { worker: String, phase: Phase },
}

impl RunError {
    /// Shorthand for the `InvalidArgument` variant.
    pub fn invalid(reason: impl Into<String>) -> Self {
        RunError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
