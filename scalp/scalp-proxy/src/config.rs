//! Proxy-build parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ProxyError;

/// Parameters for proxy-surface construction.
///
/// # Example
///
/// ```
/// use scalp_proxy::ProxyConfig;
///
/// let config = ProxyConfig::preview().with_offset(0.006);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProxyConfig {
    /// Latitude bands between the rim and the pole.
    pub rings: u32,

    /// Longitude slices around the dome.
    pub segments: u32,

    /// Outward offset from the source surface, in mesh units.
    pub offset: f64,

    /// Number of Laplacian smoothing passes.
    pub smoothing_iterations: u32,

    /// Laplacian step weight (lambda), in (0, 1).
    pub smoothing_weight: f64,

    /// Pitch angle (radians) below which a dome vertex counts as rim and is
    /// pinned to the base circle instead of projected onto the source.
    pub rim_margin: f64,

    /// Dome radius as a multiple of the reference-plane base radius. Must
    /// stay above 1.0 so the dome encloses the scalp ring at the equator.
    pub radius_scale: f64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            rings: 24,
            segments: 48,
            offset: 0.004,
            smoothing_iterations: 10,
            smoothing_weight: 0.28,
            rim_margin: 0.05,
            radius_scale: 1.15,
        }
    }
}

impl ProxyConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast but coarse, good for interactive preview while a head loads.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            rings: 12,
            segments: 24,
            smoothing_iterations: 4,
            ..Self::default()
        }
    }

    /// Fine tessellation for the final session surface.
    #[must_use]
    pub fn high_quality() -> Self {
        Self {
            rings: 36,
            segments: 72,
            smoothing_iterations: 20,
            ..Self::default()
        }
    }

    /// Set the dome tessellation.
    #[must_use]
    pub const fn with_tessellation(mut self, rings: u32, segments: u32) -> Self {
        self.rings = rings;
        self.segments = segments;
        self
    }

    /// Set the outward surface offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the number of smoothing passes.
    #[must_use]
    pub const fn with_smoothing_iterations(mut self, iterations: u32) -> Self {
        self.smoothing_iterations = iterations;
        self
    }

    /// Set the Laplacian step weight.
    #[must_use]
    pub const fn with_smoothing_weight(mut self, weight: f64) -> Self {
        self.smoothing_weight = weight;
        self
    }

    /// Check the configuration for invalid values.
    ///
    /// # Errors
    ///
    /// Returns the first of: tessellation below 2 rings / 3 segments, a
    /// negative or non-finite offset, or a smoothing weight outside (0, 1).
    pub fn validate(&self) -> Result<(), ProxyError> {
        if self.rings < 2 || self.segments < 3 {
            return Err(ProxyError::InvalidTessellation {
                rings: self.rings,
                segments: self.segments,
            });
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(ProxyError::InvalidOffset(self.offset));
        }
        if !self.smoothing_weight.is_finite()
            || self.smoothing_weight <= 0.0
            || self.smoothing_weight >= 1.0
        {
            return Err(ProxyError::InvalidSmoothingWeight(self.smoothing_weight));
        }
        Ok(())
    }
}
