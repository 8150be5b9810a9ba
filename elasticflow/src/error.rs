//! Construction-time errors.

use thiserror::Error;

/// Rejected unit configuration or checkpoint.
///
/// Handshake misuse is never reported here: it is a wiring bug and is caught by debug assertions instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A buffer was configured with no slots.
    #[error("`{unit}` needs at least one slot")]
    ZeroCapacity {
        /// Name of the offending unit.
        unit: &'static str,
    },
    /// A threshold does not fit in the buffer it guards.
    #[error("threshold {threshold} of `{unit}` must be within 1..={depth}")]
    ThresholdOutOfRange {
        /// Name of the offending unit.
        unit: &'static str,
        /// Requested threshold.
        threshold: usize,
        /// Depth of the guarded buffer.
        depth: usize,
    },
    /// A checkpoint does not fit the unit it is restored into.
    #[error("checkpoint of `{unit}` is inconsistent: {reason}")]
    InconsistentState {
        /// Name of the offending unit.
        unit: &'static str,
        /// What does not fit.
        reason: &'static str,
    },
}
