//! Error types for proxy-surface construction.

use thiserror::Error;

/// Errors that can occur when building a proxy surface.
///
/// Every variant is a construction-time input problem. Per-vertex ray misses
/// and degenerate fiducials are handled upstream as recoverable conditions
/// and never surface here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProxyError {
    /// The source mesh has no faces to project onto.
    #[error("source mesh has no faces")]
    EmptySourceMesh,

    /// Dome tessellation below the minimum (2 rings, 3 segments).
    #[error("tessellation too coarse: {rings} rings x {segments} segments")]
    InvalidTessellation {
        /// Requested latitude ring count.
        rings: u32,
        /// Requested longitude segment count.
        segments: u32,
    },

    /// Outward offset is negative or not finite.
    #[error("invalid surface offset: {0}")]
    InvalidOffset(f64),

    /// Laplacian weight outside the open interval (0, 1).
    #[error("smoothing weight {0} not in (0, 1)")]
    InvalidSmoothingWeight(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_inputs() {
        let err = ProxyError::InvalidTessellation {
            rings: 1,
            segments: 2,
        };
        assert!(err.to_string().contains('1'));
        assert!(err.to_string().contains('2'));

        let err = ProxyError::InvalidSmoothingWeight(1.5);
        assert!(err.to_string().contains("1.5"));
    }
}
