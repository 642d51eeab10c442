//! Exponentially damped transform following.

use nalgebra::{Point3, UnitQuaternion};

/// Damped follower of a target transform.
///
/// Each tick the follower moves a fraction `1 - exp(-k * dt)` of the way to
/// the target. The exponential form makes convergence frame-rate
/// independent - two half-size ticks land exactly where one full tick
/// does - and can never overshoot.
///
/// # Example
///
/// ```
/// use coil_control::TransformSmoother;
/// use nalgebra::{Point3, UnitQuaternion};
///
/// let mut smoother = TransformSmoother::new(Point3::origin(), UnitQuaternion::identity());
/// let target = Point3::new(1.0, 0.0, 0.0);
/// smoother.advance(&target, &UnitQuaternion::identity(), 0.016, 18.0, 14.0);
///
/// // Moved toward the target, but not past it
/// assert!(smoother.position().x > 0.0);
/// assert!(smoother.position().x < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSmoother {
    position: Point3<f64>,
    rotation: UnitQuaternion<f64>,
}

impl TransformSmoother {
    /// Create a smoother at the given initial transform.
    #[must_use]
    pub const fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// The smoothed position.
    #[must_use]
    pub const fn position(&self) -> Point3<f64> {
        self.position
    }

    /// The smoothed rotation.
    #[must_use]
    pub const fn rotation(&self) -> UnitQuaternion<f64> {
        self.rotation
    }

    /// Advance one tick toward the target transform.
    ///
    /// `k_position` and `k_rotation` are stiffnesses in 1/s; higher values
    /// converge faster. A non-positive or non-finite `dt` is a no-op.
    pub fn advance(
        &mut self,
        target_position: &Point3<f64>,
        target_rotation: &UnitQuaternion<f64>,
        dt: f64,
        k_position: f64,
        k_rotation: f64,
    ) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let alpha_position = 1.0 - (-k_position * dt).exp();
        let alpha_rotation = 1.0 - (-k_rotation * dt).exp();

        self.position += (target_position - self.position) * alpha_position;
        // Antipodal quaternions have no unique interpolation path; jump to
        // the target rather than picking one arbitrarily.
        self.rotation = self
            .rotation
            .try_slerp(target_rotation, alpha_rotation, 1e-9)
            .unwrap_or(*target_rotation);
    }

    /// Jump straight to a transform, bypassing damping.
    ///
    /// Used by snap placement, which is instantaneous by design.
    pub fn snap_to(&mut self, position: &Point3<f64>, rotation: &UnitQuaternion<f64>) {
        self.position = *position;
        self.rotation = *rotation;
    }
}
