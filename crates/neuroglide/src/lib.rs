//! Coil placement and stimulation timing core.
//!
//! NeuroGlide simulates a rigid stimulation coil gliding over a smoothed
//! proxy of a coarse head mesh, and deterministically times pulse emission
//! for standard and theta-burst protocols. This umbrella crate re-exports
//! the whole stack and adds [`Session`], which wires the pieces together
//! behind a single per-frame `update` call.
//!
//! # Module Organization
//!
//! - [`types`] - Meshes, triangles, rays, bounds ([`scalp_types`])
//! - [`plane`] - Fiducial reference-plane estimation ([`scalp_plane`])
//! - [`proxy`] - Proxy-surface construction ([`scalp_proxy`])
//! - [`track`] - Surface queries ([`scalp_track`])
//! - [`control`] - Ghost movement controller ([`coil_control`])
//! - [`pulse`] - Pulse scheduling ([`stim_pulse`])
//!
//! # Quick Start
//!
//! ```
//! use neuroglide::{
//!     ControlAction, ControlConfig, InputState, Protocol, ProxyConfig, Session, SurfaceMesh,
//! };
//!
//! // A coarse octahedral "head scan"
//! let positions = [
//!     1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
//!     0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
//! ];
//! let indices = [
//!     0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4,
//!     2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
//! ];
//! let source = SurfaceMesh::from_raw(&positions, &indices);
//!
//! let mut session = Session::new(
//!     &source,
//!     None,
//!     ProxyConfig::preview(),
//!     ControlConfig::default(),
//!     Protocol::standard(10.0, 40, 11.0, 3000).unwrap(),
//! )
//! .unwrap();
//!
//! let mut input = InputState::new();
//! input.press(ControlAction::MoveLeft);
//! let tick = session.update(&input, 0.016);
//! assert!(!tick.interval.in_inter_train_interval);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod session;

pub use session::{Session, SessionError, SessionTick};

/// Mesh, ray, and bounding types.
pub use scalp_types as types;

/// Fiducial reference-plane estimation.
pub use scalp_plane as plane;

/// Proxy-surface construction.
pub use scalp_proxy as proxy;

/// Surface queries.
pub use scalp_track as track;

/// Ghost movement control.
pub use coil_control as control;

/// Pulse scheduling.
pub use stim_pulse as pulse;

// Flat re-exports of the types an embedder touches every frame
pub use coil_control::{
    CoilPose, ControlAction, ControlConfig, GhostController, GhostState, InputState,
    OrientationBuilder, PlacementDiagnostics, SnapRequest, TransformSmoother,
};
pub use scalp_plane::{estimate_reference_plane, FiducialSet, ReferencePlane};
pub use scalp_proxy::{build_proxy_surface, ProxyConfig, ProxyError};
pub use scalp_track::SurfaceTracker;
pub use scalp_types::{Ray, SurfaceHit, SurfaceMesh, Vertex};
pub use stim_pulse::{
    IntervalState, Protocol, ProtocolError, PulseScheduler, StimulationType,
};
