//! Anatomical landmark set.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four anatomical landmarks anchoring a session.
///
/// Consumed once by plane estimation; the estimator does not retain it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FiducialSet {
    /// Bridge of the nose.
    pub nasion: Point3<f64>,
    /// Occipital protuberance at the back of the skull.
    pub inion: Point3<f64>,
    /// Point anterior to the left ear canal.
    pub left_preauricular: Point3<f64>,
    /// Point anterior to the right ear canal.
    pub right_preauricular: Point3<f64>,
}

impl FiducialSet {
    /// Create a fiducial set from the four landmark positions.
    #[must_use]
    pub const fn new(
        nasion: Point3<f64>,
        inion: Point3<f64>,
        left_preauricular: Point3<f64>,
        right_preauricular: Point3<f64>,
    ) -> Self {
        Self {
            nasion,
            inion,
            left_preauricular,
            right_preauricular,
        }
    }

    /// All four landmarks as an array.
    #[must_use]
    pub const fn points(&self) -> [Point3<f64>; 4] {
        [
            self.nasion,
            self.inion,
            self.left_preauricular,
            self.right_preauricular,
        ]
    }

    /// Mean of the four landmarks.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self.nasion.coords
            + self.inion.coords
            + self.left_preauricular.coords
            + self.right_preauricular.coords;
        Point3::from(sum * 0.25)
    }

    /// Anterior axis: nasion minus inion.
    #[must_use]
    pub fn anterior_axis(&self) -> Vector3<f64> {
        self.nasion - self.inion
    }

    /// Lateral axis: left minus right preauricular.
    #[must_use]
    pub fn lateral_axis(&self) -> Vector3<f64> {
        self.left_preauricular - self.right_preauricular
    }

    /// Smallest distance between any two landmarks.
    ///
    /// Used as the corruption check: tracked landmarks collapsing onto each
    /// other is the common failure mode of a lost registration.
    #[must_use]
    pub fn min_pairwise_distance(&self) -> f64 {
        let points = self.points();
        let mut min = f64::INFINITY;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min = min.min((points[i] - points[j]).norm());
            }
        }
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn head_fiducials() -> FiducialSet {
        FiducialSet::new(
            Point3::new(0.0, 0.0, 0.09),
            Point3::new(0.0, 0.0, -0.09),
            Point3::new(-0.08, 0.0, 0.0),
            Point3::new(0.08, 0.0, 0.0),
        )
    }

    #[test]
    fn centroid_is_origin_for_symmetric_set() {
        let c = head_fiducials().centroid();
        assert_relative_eq!(c.coords.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn min_pairwise_distance_is_positive() {
        assert!(head_fiducials().min_pairwise_distance() > 0.1);
    }

    #[test]
    fn collapsed_landmarks_have_zero_spacing() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let f = FiducialSet::new(p, p, p, p);
        assert_relative_eq!(f.min_pairwise_distance(), 0.0, epsilon = 1e-12);
    }
}
