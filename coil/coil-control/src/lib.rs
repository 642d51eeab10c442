//! Ghost-coordinate coil movement control.
//!
//! The controller's authoritative state is the **ghost**: the intended coil
//! placement as head-relative spherical coordinates `(yaw, pitch)` plus the
//! orientation sub-axes `(twist, tilt)`. Each tick, input produces a
//! *candidate* ghost; the candidate is projected onto the proxy surface and
//! adopted **only if the projection succeeds** (commit-on-hit). A failed
//! projection leaves the ghost, and therefore the coil, exactly where it
//! was - a hard, glitch-free movement boundary with no post-hoc clamping.
//!
//! What gets rendered is not the ghost's target transform but a
//! [`TransformSmoother`]: an exponentially damped follower that converges
//! frame-rate-independently and without overshoot. Snaps bypass the damping
//! by design; continuous movement never does.
//!
//! Movement is expressed entirely in the reference-plane frame, so the same
//! key always moves the coil the same way over the head no matter where the
//! camera is.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod diagnostics;
mod ghost;
mod input;
mod orient;
mod smooth;

pub use config::ControlConfig;
pub use diagnostics::PlacementDiagnostics;
pub use ghost::{
    CoilPose, GhostController, GhostState, SnapRequest, TargetTransform, PITCH_MAX, PITCH_MIN,
    TILT_LIMIT,
};
pub use input::{ControlAction, InputState};
pub use orient::OrientationBuilder;
pub use smooth::TransformSmoother;
