//! Vertex type for surface meshes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex: a position with an optional unit normal.
///
/// Normals are optional because source meshes arrive without them and the
/// proxy builder computes them in a dedicated pass.
///
/// # Example
///
/// ```
/// use scalp_types::Vertex;
/// use nalgebra::{Point3, Vector3};
///
/// let v = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// assert!(v.normal.is_none());
///
/// let v = v.with_normal(Vector3::y());
/// assert!(v.normal.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in world space.
    pub position: Point3<f64>,
    /// Unit normal, if one has been computed.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Create a vertex at the given position with no normal.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use scalp_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert!((v.position.x - 1.0).abs() < f64::EPSILON);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Return this vertex with the given normal attached.
    #[inline]
    #[must_use]
    pub const fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = Some(normal);
        self
    }
}
