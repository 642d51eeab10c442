//! Rays and surface-query results.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ray defined by an origin point and a direction vector.
///
/// The direction does not need to be normalized, but must be non-zero.
///
/// # Example
///
/// ```
/// use scalp_types::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::origin(), Vector3::new(2.0, 0.0, 0.0));
/// let p = ray.point_at(3.0);
/// assert!((p.x - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    /// The origin of the ray.
    pub origin: Point3<f64>,
    /// The direction of the ray (not necessarily normalized).
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Creates a new ray with the given origin and direction.
    #[must_use]
    pub const fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter `t`.
    ///
    /// The point is computed as `origin + t * direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Returns a normalized version of this ray.
    ///
    /// If the direction is zero, returns the ray unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = self.direction.norm();
        if norm < f64::EPSILON {
            return *self;
        }
        Self {
            origin: self.origin,
            direction: self.direction / norm,
        }
    }

    /// Returns the direction normalized to unit length.
    ///
    /// If the direction is zero, returns the zero vector.
    #[must_use]
    pub fn direction_normalized(&self) -> Vector3<f64> {
        let norm = self.direction.norm();
        if norm < f64::EPSILON {
            return Vector3::zeros();
        }
        self.direction / norm
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::x())
    }
}

/// Result of a successful surface query.
///
/// Normals reported by the tracker are unit length and always corrected to
/// point away from the head center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space hit point on the surface.
    pub point: Point3<f64>,
    /// Outward unit normal at the hit point.
    pub normal: Vector3<f64>,
    /// Parametric distance along the query ray.
    pub t: f64,
    /// Index of the face that was hit.
    pub face: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_at_scales_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 2.0, 0.0));
        let p = ray.point_at(1.5);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn normalized_has_unit_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(ray.normalized().direction.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_direction_survives_normalization() {
        let ray = Ray::new(Point3::origin(), Vector3::zeros());
        assert_eq!(ray.normalized(), ray);
        assert_eq!(ray.direction_normalized(), Vector3::zeros());
    }
}
