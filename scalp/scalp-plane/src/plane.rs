//! Head-relative reference plane and spherical mapping.

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The head-relative reference frame of a session.
///
/// `u`, `v` and `normal` form a right-handed orthonormal basis: `u` points
/// anterior in the plane, `normal` points up through the top of the head,
/// and `v = normal x u` completes the frame. `origin` is the in-plane head
/// center and `base_radius` the characteristic head radius at the plane.
///
/// The plane is immutable once estimated; every spherical coordinate used by
/// the movement stack is expressed in this frame, which is what makes
/// movement semantics independent of camera orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferencePlane {
    /// In-plane head center.
    pub origin: Point3<f64>,
    /// In-plane anterior axis (unit).
    pub u: Vector3<f64>,
    /// In-plane left axis, `normal x u` (unit).
    pub v: Vector3<f64>,
    /// Upward plane normal (unit).
    pub normal: Vector3<f64>,
    /// Mean in-plane landmark distance from the origin.
    pub base_radius: f64,
}

impl ReferencePlane {
    /// The world-space unit direction for head-relative spherical
    /// coordinates.
    ///
    /// `yaw` rotates from `u` toward `v` in the plane; `pitch` lifts toward
    /// the `normal` pole. `(yaw, pitch) = (0, 0)` points anterior along `u`;
    /// `pitch = pi/2` points straight up regardless of yaw.
    ///
    /// # Example
    ///
    /// ```
    /// use scalp_plane::{estimate_reference_plane, FiducialSet};
    /// use scalp_types::SurfaceMesh;
    /// use nalgebra::Point3;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let plane = estimate_reference_plane(None, &SurfaceMesh::new());
    /// let up = plane.spherical_direction(0.3, FRAC_PI_2);
    /// assert!((up - plane.normal).norm() < 1e-12);
    /// ```
    #[must_use]
    pub fn spherical_direction(&self, yaw: f64, pitch: f64) -> Vector3<f64> {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        (self.u * cos_yaw + self.v * sin_yaw) * cos_pitch + self.normal * sin_pitch
    }

    /// The head-relative `(yaw, pitch)` of a world-space point.
    ///
    /// Inverse of [`ReferencePlane::spherical_direction`] up to radial
    /// distance. Yaw is normalized into `[0, 2*pi)`. A point coincident with
    /// the origin maps to the pole `(0, pi/2)`.
    #[must_use]
    pub fn spherical_coordinates(&self, point: &Point3<f64>) -> (f64, f64) {
        let Some(dir) = (point - self.origin).try_normalize(f64::EPSILON) else {
            return (0.0, FRAC_PI_2);
        };
        let pitch = dir.dot(&self.normal).clamp(-1.0, 1.0).asin();
        let yaw = wrap_yaw(dir.dot(&self.v).atan2(dir.dot(&self.u)));
        (yaw, pitch)
    }

    /// Distance of a point from the origin measured in the plane
    /// (the normal component is ignored).
    #[must_use]
    pub fn in_plane_distance(&self, point: &Point3<f64>) -> f64 {
        let d = point - self.origin;
        d.dot(&self.u).hypot(d.dot(&self.v))
    }
}

/// Normalize a yaw angle into `[0, 2*pi)`.
///
/// Applied internally by `spherical_coordinates`; exposed for controllers
/// that accumulate yaw across ticks.
///
/// # Example
///
/// ```
/// use scalp_plane::wrap_yaw;
/// use std::f64::consts::TAU;
///
/// assert!((wrap_yaw(-0.25) - (TAU - 0.25)).abs() < 1e-12);
/// ```
#[must_use]
pub fn wrap_yaw(yaw: f64) -> f64 {
    let wrapped = yaw.rem_euclid(TAU);
    // rem_euclid can return TAU itself when yaw is a tiny negative number
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
