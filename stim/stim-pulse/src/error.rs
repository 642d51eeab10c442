//! Protocol validation errors.

use thiserror::Error;

/// Errors reported when a protocol fails validation.
///
/// A scheduler is never constructed from an invalid protocol; the session
/// refuses to start and the error is reported to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    /// Frequency must be positive and finite.
    #[error("frequency must be positive and finite, got {0}")]
    InvalidFrequency(f64),

    /// Pulses per train must be positive.
    #[error("pulses per train must be positive")]
    InvalidPulsesPerTrain,

    /// Total pulses must be positive.
    #[error("total pulses must be positive")]
    InvalidTotalPulses,

    /// Inter-train interval must be non-negative and finite.
    #[error("inter-train interval must be non-negative and finite, got {0}")]
    InvalidInterTrainInterval(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_value() {
        let err = ProtocolError::InvalidFrequency(-5.0);
        assert!(err.to_string().contains("-5"));

        let err = ProtocolError::InvalidInterTrainInterval(f64::NAN);
        assert!(err.to_string().contains("NaN"));
    }
}
