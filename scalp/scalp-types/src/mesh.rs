//! Indexed triangle mesh.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, BoundingSphere, Triangle, Vertex};

/// An indexed triangle mesh.
///
/// This is the one mesh type in NeuroGlide. The coarse source head mesh and
/// the smoothed proxy surface are both `SurfaceMesh` values; they differ only
/// in ownership (the source mesh is caller-owned and read-only, the proxy is
/// built and owned by the core).
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside,
/// so face normals point outward by the right-hand rule.
///
/// # Example
///
/// ```
/// use scalp_types::{SurfaceMesh, Vertex};
///
/// let mut mesh = SurfaceMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle faces as indices into the vertex array, CCW winding.
    pub faces: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// `positions` is `[x0, y0, z0, x1, y1, z1, ...]` and `indices` is
    /// `[v0a, v1a, v2a, v0b, ...]`. Returns an empty mesh if either slice
    /// length is not divisible by 3.
    ///
    /// # Example
    ///
    /// ```
    /// use scalp_types::SurfaceMesh;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let indices = [0, 1, 2];
    ///
    /// let mesh = SurfaceMesh::from_raw(&positions, &indices);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();

        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no renderable geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The triangle for a given face index, or `None` if out of range.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces.get(face_index).map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }

    /// The axis-aligned bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// A bounding sphere of all vertices.
    ///
    /// Returns `None` for a mesh with no vertices.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        BoundingSphere::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Translate every vertex by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Recompute smooth per-vertex normals.
    ///
    /// Accumulates area-weighted face normals at each vertex (the raw cross
    /// product's magnitude is twice the face area, so summing unnormalized
    /// face normals weights by area for free) and normalizes. Vertices that
    /// belong to no face, or whose accumulated normal cancels to zero, end
    /// up with `normal = None`.
    pub fn recompute_vertex_normals(&mut self) {
        let mut accumulated = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.faces {
            let tri = Triangle {
                v0: self.vertices[i0 as usize].position,
                v1: self.vertices[i1 as usize].position,
                v2: self.vertices[i2 as usize].position,
            };
            let face_normal = tri.normal_unnormalized();
            accumulated[i0 as usize] += face_normal;
            accumulated[i1 as usize] += face_normal;
            accumulated[i2 as usize] += face_normal;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            vertex.normal = normal.try_normalize(f64::EPSILON);
        }
    }

    /// Flip vertex normals that point toward `center` so all point away.
    ///
    /// Face winding is left untouched; only the per-vertex normal field is
    /// corrected.
    pub fn orient_normals_away_from(&mut self, center: &Point3<f64>) {
        for vertex in &mut self.vertices {
            if let Some(ref mut normal) = vertex.normal {
                if normal.dot(&(vertex.position - center)) < 0.0 {
                    *normal = -*normal;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_mesh() -> SurfaceMesh {
        // Two triangles in the z=0 plane
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        let indices = [0, 1, 2, 0, 2, 3];
        SurfaceMesh::from_raw(&positions, &indices)
    }

    #[test]
    fn from_raw_rejects_ragged_input() {
        let mesh = SurfaceMesh::from_raw(&[0.0, 1.0], &[0, 1, 2]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn triangle_lookup() {
        let mesh = quad_mesh();
        assert!(mesh.triangle(0).is_some());
        assert!(mesh.triangle(2).is_none());
    }

    #[test]
    fn bounds_cover_vertices() {
        let mesh = quad_mesh();
        let bounds = mesh.bounds();
        assert_relative_eq!(bounds.min.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn planar_mesh_normals_point_up() {
        let mut mesh = quad_mesh();
        mesh.recompute_vertex_normals();
        for v in &mesh.vertices {
            let n = v.normal.unwrap();
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn orient_normals_flips_inward_normals() {
        let mut mesh = quad_mesh();
        mesh.recompute_vertex_normals();
        // A center above the plane sees the +Z normals as pointing toward it.
        mesh.orient_normals_away_from(&Point3::new(0.5, 0.5, 10.0));
        for v in &mesh.vertices {
            assert!(v.normal.unwrap().z < 0.0);
        }
    }

    #[test]
    fn translate_moves_vertices() {
        let mut mesh = quad_mesh();
        mesh.translate(Vector3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(mesh.vertices[0].position.z, 2.0, epsilon = 1e-12);
    }
}
