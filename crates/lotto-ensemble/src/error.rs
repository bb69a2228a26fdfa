use lotto_types::{SourceId, TypeError};

/// Errors that can occur while combining candidates.
#[derive(Debug, thiserror::Error)]
pub enum EnsembleError {
    /// Weights cannot be renormalized (non-positive or non-finite total).
    #[error("invalid weight state: {0}")]
    InvalidWeightState(String),

    /// Pick counts, ranges, weights, or limits are mutually inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A candidate violates the game invariants. Returned only when no
    /// valid candidate remains; individual failures are dropped.
    #[error("invalid candidate: {0}")]
    InvalidCandidate(String),

    /// A bias component is outside [0, 1].
    #[error("invalid bias: {0}")]
    InvalidBias(String),
}

impl EnsembleError {
    pub(crate) fn configuration(err: TypeError) -> Self {
        Self::Configuration(err.to_string())
    }

    pub(crate) fn candidate(source: &SourceId, reason: impl std::fmt::Display) -> Self {
        Self::InvalidCandidate(format!("{source}: {reason}"))
    }
}

/// Convenience alias for ensemble results.
pub type EnsembleResult<T> = Result<T, EnsembleError>;
