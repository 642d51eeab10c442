//! Placement diagnostics counters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Explicit, caller-scoped diagnostics for the movement stack.
///
/// Passed by mutable reference into every controller tick; there is no
/// global registry. Embedders surface these counters in debug overlays or
/// drop them entirely by passing a scratch instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementDiagnostics {
    /// Spherical projections attempted (movement, drags, and snaps).
    pub projection_attempts: u64,
    /// Candidate moves adopted because their projection hit.
    pub committed_moves: u64,
    /// Candidate moves dropped because their projection missed.
    pub rejected_commits: u64,
    /// Snap requests applied.
    pub snaps_applied: u64,
    /// Snap requests consumed without effect (projection missed).
    pub snaps_rejected: u64,
}

impl PlacementDiagnostics {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
