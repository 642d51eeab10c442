//! Fiducial reference-plane estimation.
//!
//! A head-tracking session is anchored by four anatomical landmarks
//! (fiducials): nasion, inion, and the left/right preauricular points. From
//! these this crate derives a [`ReferencePlane`] - an orthonormal
//! head-relative frame plus a base radius - that every downstream geometry
//! query is expressed in.
//!
//! Estimation never fails: corrupted or missing fiducials fall back to a
//! plane derived from the source mesh's bounding sphere, with a `tracing`
//! warning.
//!
//! # Example
//!
//! ```
//! use scalp_plane::{estimate_reference_plane, FiducialSet};
//! use scalp_types::SurfaceMesh;
//! use nalgebra::Point3;
//!
//! let fiducials = FiducialSet::new(
//!     Point3::new(0.0, 0.0, 0.09),   // nasion
//!     Point3::new(0.0, 0.0, -0.09),  // inion
//!     Point3::new(-0.08, 0.0, 0.0),  // left preauricular
//!     Point3::new(0.08, 0.0, 0.0),   // right preauricular
//! );
//!
//! let plane = estimate_reference_plane(Some(&fiducials), &SurfaceMesh::new());
//! assert!(plane.base_radius > 0.08);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod estimate;
mod fiducials;
mod plane;

pub use estimate::{estimate_reference_plane, FALLBACK_RADIUS_SCALE, MIN_FIDUCIAL_SPACING};
pub use fiducials::FiducialSet;
pub use plane::{wrap_yaw, ReferencePlane};
