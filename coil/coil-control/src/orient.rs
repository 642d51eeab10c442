//! Coil orientation from surface normal, twist, and tilt.

use nalgebra::{Rotation3, Unit, UnitQuaternion, Vector3};

use scalp_plane::ReferencePlane;

/// Rejection norms below this are treated as degenerate and routed to the
/// fallback handle.
const HANDLE_EPSILON: f64 = 1e-6;

/// Builds a stable coil pose from a surface normal and the twist/tilt
/// sub-axes.
///
/// Conventions: the coil's local `+Z` is its outward axis, so the contact
/// face (local `-Z`) presses along `-normal`. Absent user twist, the handle
/// (local `+Y`) points toward the in-tangent-plane projection of a fixed
/// **reference posterior** direction - the handle always wants to point
/// backward. `twist` then rotates about the local normal and `tilt` leans
/// about the in-plane axis orthogonal to the handle.
///
/// When the posterior projection degenerates (surface normal parallel to the
/// posterior direction), the handle falls back to the projection of a fixed
/// secondary axis instead of producing a chaotic result. The fallback is the
/// plane's up axis, which is orthogonal to the posterior direction and so
/// can never degenerate at the same configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationBuilder {
    reference_posterior: Vector3<f64>,
    fallback_handle: Vector3<f64>,
}

impl OrientationBuilder {
    /// Create a builder with explicit posterior and fallback directions.
    ///
    /// Both are normalized; a zero posterior falls back to `-X`, a zero
    /// fallback to `+Y`.
    #[must_use]
    pub fn new(reference_posterior: Vector3<f64>, fallback_handle: Vector3<f64>) -> Self {
        Self {
            reference_posterior: reference_posterior
                .try_normalize(f64::EPSILON)
                .unwrap_or(-Vector3::x()),
            fallback_handle: fallback_handle
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vector3::y),
        }
    }

    /// Create a builder aligned to a session reference plane: posterior is
    /// the plane's `-u` (away from the nasion), fallback is the plane's up
    /// axis.
    #[must_use]
    pub fn from_plane(plane: &ReferencePlane) -> Self {
        Self::new(-plane.u, plane.normal)
    }

    /// The world direction the handle reaches toward before twist.
    #[must_use]
    pub const fn reference_posterior(&self) -> Vector3<f64> {
        self.reference_posterior
    }

    /// Build the orientation for a surface normal and twist/tilt angles.
    ///
    /// Always returns a valid unit quaternion, including at the pose
    /// singularities.
    #[must_use]
    pub fn orientation(&self, normal: &Vector3<f64>, twist: f64, tilt: f64) -> UnitQuaternion<f64> {
        let z = normal
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::y);

        let handle = reject(&self.reference_posterior, &z)
            .or_else(|| reject(&self.fallback_handle, &z))
            .unwrap_or_else(|| find_perpendicular(&z));

        // Right-handed frame: x = y cross z
        let x = handle.cross(&z);
        let base = UnitQuaternion::from_rotation_matrix(&Rotation3::from_basis_unchecked(&[
            x, handle, z,
        ]));

        let twist_rotation = UnitQuaternion::from_axis_angle(&Unit::new_unchecked(z), twist);
        let tilt_axis = twist_rotation * x;
        let tilt_rotation = UnitQuaternion::from_axis_angle(&Unit::new_normalize(tilt_axis), tilt);

        tilt_rotation * twist_rotation * base
    }
}

/// Unit component of `v` orthogonal to unit vector `n`, or `None` when the
/// rejection is too short to normalize stably.
fn reject(v: &Vector3<f64>, n: &Vector3<f64>) -> Option<Vector3<f64>> {
    (v - n * v.dot(n)).try_normalize(HANDLE_EPSILON)
}

/// A unit vector perpendicular to `v`, chosen from the axis most
/// perpendicular to it.
fn find_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let axis = if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scalp_plane::estimate_reference_plane;
    use scalp_types::SurfaceMesh;

    fn builder() -> OrientationBuilder {
        let plane = estimate_reference_plane(None, &SurfaceMesh::new());
        OrientationBuilder::from_plane(&plane)
    }

    #[test]
    fn contact_axis_aligns_with_negated_normal() {
        let b = builder();
        for normal in [
            Vector3::y(),
            Vector3::new(0.3, 0.9, 0.1).normalize(),
            Vector3::new(-0.5, 0.2, 0.6).normalize(),
        ] {
            let q = b.orientation(&normal, 0.0, 0.0);
            let contact = q * -Vector3::z();
            assert_relative_eq!((contact + normal).norm(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn handle_points_toward_posterior_projection() {
        let b = builder();
        // At the pole the tangent plane contains the posterior direction.
        let q = b.orientation(&Vector3::y(), 0.0, 0.0);
        let handle = q * Vector3::y();
        assert_relative_eq!((handle - b.reference_posterior()).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn twist_rotates_handle_about_normal() {
        let b = builder();
        let normal = Vector3::y();
        let straight = b.orientation(&normal, 0.0, 0.0) * Vector3::y();
        let twisted = b.orientation(&normal, std::f64::consts::FRAC_PI_2, 0.0) * Vector3::y();
        // Quarter twist moves the handle a quarter turn in the tangent plane
        assert_relative_eq!(straight.dot(&twisted), 0.0, epsilon = 1e-10);
        assert_relative_eq!(twisted.dot(&normal), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn tilt_leans_contact_axis() {
        let b = builder();
        let normal = Vector3::y();
        let tilt = 0.3;
        let q = b.orientation(&normal, 0.0, tilt);
        let outward = q * Vector3::z();
        // Leans away from the normal by exactly the tilt angle
        assert_relative_eq!(outward.dot(&normal).acos(), tilt, epsilon = 1e-10);
    }

    #[test]
    fn pole_fallback_is_stable() {
        let b = builder();
        // Surface normal parallel to the posterior direction: the posterior
        // projection degenerates and the fallback handle takes over.
        let normal = b.reference_posterior();
        let q = b.orientation(&normal, 0.0, 0.0);
        let handle = q * Vector3::y();
        assert!(handle.norm().is_finite());
        assert_relative_eq!(handle.norm(), 1.0, epsilon = 1e-10);
        // Deterministic: same input, same frame
        let q2 = b.orientation(&normal, 0.0, 0.0);
        assert_relative_eq!(q.angle_to(&q2), 0.0, epsilon = 1e-12);
        // The fallback keeps the handle in the tangent plane
        assert_relative_eq!(handle.dot(&normal), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn near_singular_normals_stay_continuous() {
        let b = builder();
        let posterior = b.reference_posterior();
        // A normal a hair off the singular direction still produces a unit
        // frame with finite components.
        let normal = (posterior + Vector3::new(0.0, 1e-4, 0.0)).normalize();
        let q = b.orientation(&normal, 0.1, 0.05);
        let rotated = q * Vector3::z();
        assert!(rotated.iter().all(|c| c.is_finite()));
        assert_relative_eq!(rotated.norm(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn degenerate_normal_still_yields_unit_quaternion() {
        let b = builder();
        let q = b.orientation(&Vector3::zeros(), 0.2, 0.1);
        assert!((q * Vector3::z()).norm().is_finite());
    }
}
