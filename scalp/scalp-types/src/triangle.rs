//! Triangle type with ray-intersection support.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ray::Ray;

/// A ray-triangle intersection with barycentric coordinates.
///
/// The third barycentric coordinate is `w = 1 - u - v` (weight of `v0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleIntersection {
    /// Ray parameter at the intersection.
    pub t: f64,
    /// Barycentric coordinates `(u, v)` weighting `v1` and `v2`.
    pub barycentric: (f64, f64),
}

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use scalp_types::Triangle;
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// let normal = tri.normal().unwrap();
/// assert!((normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The direction follows the right-hand rule with CCW winding.
    /// The magnitude equals twice the triangle's area, which makes this the
    /// natural weight for area-weighted vertex normals.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area).
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.normal_unnormalized().try_normalize(f64::EPSILON)
    }

    /// Compute the triangle's area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Compute the triangle's centroid.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Ray-triangle intersection using the Möller-Trumbore algorithm.
    ///
    /// Returns `Some(t)` where `t` is the ray parameter at the intersection
    /// (`ray.origin + t * ray.direction`), or `None` when the ray misses,
    /// is parallel to the triangle plane, or would hit behind the origin.
    ///
    /// # Example
    ///
    /// ```
    /// use scalp_types::{Ray, Triangle};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(-1.0, -1.0, 5.0),
    ///     Point3::new(1.0, -1.0, 5.0),
    ///     Point3::new(0.0, 1.0, 5.0),
    /// );
    /// let ray = Ray::new(Point3::origin(), Vector3::z());
    ///
    /// let t = tri.ray_intersect(&ray, 1e-12).unwrap();
    /// assert!((t - 5.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn ray_intersect(&self, ray: &Ray, epsilon: f64) -> Option<f64> {
        self.ray_intersect_detailed(ray, epsilon).map(|hit| hit.t)
    }

    /// Ray-triangle intersection returning barycentric coordinates.
    ///
    /// Same algorithm and acceptance rules as
    /// [`Triangle::ray_intersect`], but keeps the barycentric coordinates
    /// for callers that interpolate vertex attributes at the hit point.
    #[must_use]
    pub fn ray_intersect_detailed(&self, ray: &Ray, epsilon: f64) -> Option<TriangleIntersection> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray is parallel to triangle
        if a.abs() < epsilon {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);

        // Intersection is outside triangle
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);

        // Intersection is outside triangle
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);

        // Intersection is behind ray origin
        if t > epsilon {
            Some(TriangleIntersection {
                t,
                barycentric: (u, v),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xy_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn area_of_unit_right_triangle() {
        assert_relative_eq!(xy_triangle().area(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn normal_follows_winding() {
        let n = xy_triangle().normal().unwrap();
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.normal().is_none());
    }

    #[test]
    fn centroid_is_mean() {
        let c = xy_triangle().centroid();
        assert_relative_eq!(c.x, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_hits_triangle_interior() {
        let tri = xy_triangle();
        let ray = Ray::new(Point3::new(0.25, 0.25, -1.0), Vector3::z());
        let t = tri.ray_intersect(&ray, 1e-12).unwrap();
        assert_relative_eq!(t, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn detailed_hit_reports_barycentrics() {
        let tri = xy_triangle();
        let ray = Ray::new(Point3::new(0.25, 0.25, -1.0), Vector3::z());
        let hit = tri.ray_intersect_detailed(&ray, 1e-12).unwrap();
        let (u, v) = hit.barycentric;
        assert_relative_eq!(u, 0.25, epsilon = 1e-10);
        assert_relative_eq!(v, 0.25, epsilon = 1e-10);
        // Barycentric reconstruction lands on the hit point
        let p = tri.v0.coords * (1.0 - u - v) + tri.v1.coords * u + tri.v2.coords * v;
        let expected = ray.point_at(hit.t).coords;
        assert_relative_eq!((p - expected).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn ray_misses_outside_triangle() {
        let tri = xy_triangle();
        let ray = Ray::new(Point3::new(2.0, 2.0, -1.0), Vector3::z());
        assert!(tri.ray_intersect(&ray, 1e-12).is_none());
    }

    #[test]
    fn ray_behind_origin_misses() {
        let tri = xy_triangle();
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vector3::z());
        assert!(tri.ray_intersect(&ray, 1e-12).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let tri = xy_triangle();
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::x());
        assert!(tri.ray_intersect(&ray, 1e-12).is_none());
    }
}
