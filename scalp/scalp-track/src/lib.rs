//! Surface queries over the proxy mesh.
//!
//! The [`SurfaceTracker`] answers the three queries the movement stack
//! needs - closest surface point, screen-ray hit, and head-relative
//! spherical projection - against the proxy surface, never the source mesh.
//!
//! # Continuity-preserving hit selection
//!
//! A query ray can cross the head surface more than once (a ray grazing a
//! near-tangential fold, or a spherical ray exiting through the far side).
//! When the caller supplies a reference point - the previously tracked
//! position - the tracker picks the intersection **closest to the
//! reference**, not the first along the ray. This is what keeps the tracked
//! point from jumping across the midline when consecutive queries straddle
//! a fold.
//!
//! All queries are synchronous and side-effect-free.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod tracker;

pub use tracker::{SurfaceTracker, QUERY_RADIUS_SCALE, RAY_EPSILON};
