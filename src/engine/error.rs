//! Engine error types.

use thiserror::Error;

/// Errors from engine construction.
///
/// Runtime operations never raise: precondition failures (disposed
/// context, stale version) surface as [`SyncOutcome`](super::SyncOutcome)
/// variants or `false` returns, and per-marker collaborator failures are
/// contained inside the sync pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Bucketing tolerance must be a positive, finite number of meters
    #[error("Invalid bucketing tolerance: {0} (must be finite and > 0)")]
    InvalidTolerance(f64),

    /// Region filter has a minimum corner beyond its maximum
    #[error("Malformed region filter: min corner exceeds max corner")]
    MalformedRegion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_tolerance() {
        let err = EngineError::InvalidTolerance(-5.0);
        assert!(err.to_string().contains("-5"));
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn test_display_malformed_region() {
        let err = EngineError::MalformedRegion;
        assert!(err.to_string().contains("region"));
    }
}
