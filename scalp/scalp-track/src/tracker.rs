//! The surface tracker.

use nalgebra::{Point3, Vector3};

use scalp_plane::ReferencePlane;
use scalp_types::{Ray, SurfaceHit, SurfaceMesh};

/// Spherical query rays start this many base radii out from the head
/// center, safely outside any proxy the builder can produce.
pub const QUERY_RADIUS_SCALE: f64 = 4.0;

/// Tolerance for the ray-triangle parallel test.
pub const RAY_EPSILON: f64 = 1e-12;

/// Point and ray queries against the proxy surface.
///
/// Owns the proxy mesh for the session. The mesh is read-only between
/// [`SurfaceTracker::replace_proxy`] calls, which swap in a freshly built
/// mesh wholesale.
///
/// # Example
///
/// ```
/// use scalp_plane::estimate_reference_plane;
/// use scalp_proxy::{build_proxy_surface, ProxyConfig};
/// use scalp_track::SurfaceTracker;
/// use scalp_types::SurfaceMesh;
///
/// let positions = [
///     1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
///     0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
/// ];
/// let indices = [
///     0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4,
///     2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
/// ];
/// let source = SurfaceMesh::from_raw(&positions, &indices);
/// let plane = estimate_reference_plane(None, &source);
/// let proxy = build_proxy_surface(&plane, &source, &ProxyConfig::preview()).unwrap();
///
/// let tracker = SurfaceTracker::new(proxy, plane);
/// let hit = tracker.project_spherical(1.0, 0.7, None).unwrap();
/// assert!(hit.normal.norm() > 0.99);
/// ```
#[derive(Debug, Clone)]
pub struct SurfaceTracker {
    proxy: SurfaceMesh,
    plane: ReferencePlane,
}

impl SurfaceTracker {
    /// Create a tracker over a freshly built proxy mesh.
    #[must_use]
    pub const fn new(proxy: SurfaceMesh, plane: ReferencePlane) -> Self {
        Self { proxy, plane }
    }

    /// The proxy mesh being queried.
    #[must_use]
    pub const fn proxy(&self) -> &SurfaceMesh {
        &self.proxy
    }

    /// The session reference plane.
    #[must_use]
    pub const fn plane(&self) -> &ReferencePlane {
        &self.plane
    }

    /// The head center all radial queries are measured from.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        self.plane.origin
    }

    /// Atomically replace the proxy mesh (and plane) after a rebuild.
    ///
    /// No query ever observes a partially updated surface; the old mesh is
    /// dropped wholesale.
    pub fn replace_proxy(&mut self, proxy: SurfaceMesh, plane: ReferencePlane) {
        self.proxy = proxy;
        self.plane = plane;
    }

    /// The surface point nearest to `approx` along the radial direction.
    ///
    /// Casts a ray from the head center through `approx` and picks the
    /// intersection closest to `approx`. Returns `None` when `approx`
    /// coincides with the center or the ray misses the proxy entirely.
    #[must_use]
    pub fn closest_surface_point(&self, approx: &Point3<f64>) -> Option<SurfaceHit> {
        let center = self.center();
        let direction = (approx - center).try_normalize(f64::EPSILON)?;
        let hits = self.intersections(&Ray::new(center, direction));
        select_hit(hits, Some(approx))
    }

    /// Cast a world-space ray (e.g. a pointer drag) against the proxy.
    ///
    /// With a `reference` point, multiple intersections resolve to the one
    /// nearest the reference; otherwise to the first along the ray.
    #[must_use]
    pub fn raycast(&self, ray: &Ray, reference: Option<&Point3<f64>>) -> Option<SurfaceHit> {
        let hits = self.intersections(&ray.normalized());
        select_hit(hits, reference)
    }

    /// Project head-relative spherical coordinates onto the proxy.
    ///
    /// The query ray starts outside the dome along the `(yaw, pitch)`
    /// direction and aims at the head center, so the nearest hit is on the
    /// caller's side of the head. Returns `None` when `(yaw, pitch)` points
    /// at no surface (past the dome rim).
    #[must_use]
    pub fn project_spherical(
        &self,
        yaw: f64,
        pitch: f64,
        reference: Option<&Point3<f64>>,
    ) -> Option<SurfaceHit> {
        let center = self.center();
        let direction = self.plane.spherical_direction(yaw, pitch);
        let origin = center + direction * (QUERY_RADIUS_SCALE * self.plane.base_radius);
        let hits = self.intersections(&Ray::new(origin, -direction));
        select_hit(hits, reference)
    }

    /// The head-relative `(yaw, pitch)` of a world-space point.
    ///
    /// Inverse of [`SurfaceTracker::project_spherical`] up to radial
    /// distance; used by snap placement.
    #[must_use]
    pub fn spherical_coordinates(&self, point: &Point3<f64>) -> (f64, f64) {
        self.plane.spherical_coordinates(point)
    }

    /// All proxy intersections along a ray, with smooth outward normals.
    fn intersections(&self, ray: &Ray) -> Vec<SurfaceHit> {
        let center = self.center();
        let mut hits = Vec::new();

        for (face, tri) in self.proxy.triangles().enumerate() {
            let Some(intersection) = tri.ray_intersect_detailed(ray, RAY_EPSILON) else {
                continue;
            };
            let point = ray.point_at(intersection.t);
            let normal = self
                .interpolated_normal(face, intersection.barycentric)
                .or_else(|| tri.normal())
                .map(|n| {
                    // Corrected to point away from the head center
                    if n.dot(&(point - center)) < 0.0 {
                        -n
                    } else {
                        n
                    }
                });
            let Some(normal) = normal else { continue };
            hits.push(SurfaceHit {
                point,
                normal,
                t: intersection.t,
                face,
            });
        }

        hits
    }

    /// Barycentric interpolation of the proxy's smooth vertex normals.
    ///
    /// Falls back to `None` (caller uses the face normal) when any corner
    /// is missing a vertex normal.
    fn interpolated_normal(&self, face: usize, (u, v): (f64, f64)) -> Option<Vector3<f64>> {
        let [i0, i1, i2] = self.proxy.faces[face];
        let n0 = self.proxy.vertices[i0 as usize].normal?;
        let n1 = self.proxy.vertices[i1 as usize].normal?;
        let n2 = self.proxy.vertices[i2 as usize].normal?;
        (n0 * (1.0 - u - v) + n1 * u + n2 * v).try_normalize(f64::EPSILON)
    }
}

/// Apply the continuity-preserving hit-selection policy.
fn select_hit(hits: Vec<SurfaceHit>, reference: Option<&Point3<f64>>) -> Option<SurfaceHit> {
    match reference {
        Some(reference) => hits.into_iter().min_by(|a, b| {
            let da = (a.point - reference).norm_squared();
            let db = (b.point - reference).norm_squared();
            da.total_cmp(&db)
        }),
        None => hits.into_iter().min_by(|a, b| a.t.total_cmp(&b.t)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scalp_plane::estimate_reference_plane;
    use scalp_proxy::{build_proxy_surface, ProxyConfig};
    use scalp_types::Vertex;

    fn cube_mesh(half: f64) -> SurfaceMesh {
        let mut mesh = SurfaceMesh::with_capacity(8, 12);
        for &(x, y, z) in &[
            (-1.0, -1.0, -1.0),
            (1.0, -1.0, -1.0),
            (1.0, 1.0, -1.0),
            (-1.0, 1.0, -1.0),
            (-1.0, -1.0, 1.0),
            (1.0, -1.0, 1.0),
            (1.0, 1.0, 1.0),
            (-1.0, 1.0, 1.0),
        ] {
            mesh.vertices
                .push(Vertex::from_coords(x * half, y * half, z * half));
        }
        for face in [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ] {
            mesh.faces.push(face);
        }
        mesh
    }

    fn head_tracker() -> SurfaceTracker {
        let source = cube_mesh(1.0);
        let plane = estimate_reference_plane(None, &source);
        let proxy = build_proxy_surface(&plane, &source, &ProxyConfig::preview()).unwrap();
        SurfaceTracker::new(proxy, plane)
    }

    /// Two single-triangle sheets perpendicular to +X at x = 1 and x = 3.
    fn double_sheet_tracker() -> SurfaceTracker {
        let positions = [
            1.0, -5.0, -5.0, 1.0, 5.0, -5.0, 1.0, 0.0, 5.0, //
            3.0, -5.0, -5.0, 3.0, 5.0, -5.0, 3.0, 0.0, 5.0,
        ];
        let indices = [0, 1, 2, 3, 4, 5];
        let mut proxy = SurfaceMesh::from_raw(&positions, &indices);
        proxy.recompute_vertex_normals();
        let plane = estimate_reference_plane(None, &proxy);
        SurfaceTracker::new(proxy, plane)
    }

    #[test]
    fn spherical_projection_hits_the_dome() {
        let tracker = head_tracker();
        let hit = tracker.project_spherical(0.8, 0.9, None).unwrap();
        assert_relative_eq!(hit.normal.norm(), 1.0, epsilon = 1e-9);
        // The hit is on the caller's side: its direction matches the query's
        let dir = tracker.plane().spherical_direction(0.8, 0.9);
        assert!((hit.point - tracker.center()).dot(&dir) > 0.0);
    }

    #[test]
    fn spherical_round_trip_off_pole() {
        let tracker = head_tracker();
        for &(yaw, pitch) in &[(0.4, 0.5), (2.4, 0.9), (4.4, 0.3), (5.9, 1.1)] {
            let hit = tracker.project_spherical(yaw, pitch, None).unwrap();
            let (yaw2, pitch2) = tracker.spherical_coordinates(&hit.point);
            assert_relative_eq!(yaw2, yaw, epsilon = 1e-9);
            assert_relative_eq!(pitch2, pitch, epsilon = 1e-9);
        }
    }

    #[test]
    fn normals_point_away_from_center() {
        let tracker = head_tracker();
        for &(yaw, pitch) in &[(0.0, 0.3), (1.5, 0.8), (3.0, 1.2), (4.5, 0.6)] {
            let hit = tracker.project_spherical(yaw, pitch, None).unwrap();
            assert!(hit.normal.dot(&(hit.point - tracker.center())) > 0.0);
        }
    }

    #[test]
    fn reference_nearest_hit_wins() {
        let tracker = double_sheet_tracker();
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vector3::x());

        // Without a reference: first sheet along the ray
        let first = tracker.raycast(&ray, None).unwrap();
        assert_relative_eq!(first.point.x, 1.0, epsilon = 1e-9);

        // Reference near the far sheet: continuity rule selects it
        let reference = Point3::new(2.9, 0.0, 0.0);
        let far = tracker.raycast(&ray, Some(&reference)).unwrap();
        assert_relative_eq!(far.point.x, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn closest_surface_point_tracks_radially() {
        let tracker = head_tracker();
        let probe = tracker.center() + Vector3::new(0.3, 0.4, 0.1);
        let hit = tracker.closest_surface_point(&probe).unwrap();
        // Hit lies along the center->probe direction
        let dir = (probe - tracker.center()).normalize();
        let hit_dir = (hit.point - tracker.center()).normalize();
        assert_relative_eq!((dir - hit_dir).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn center_query_returns_none() {
        let tracker = head_tracker();
        assert!(tracker.closest_surface_point(&tracker.center()).is_none());
    }

    #[test]
    fn miss_returns_none() {
        let tracker = double_sheet_tracker();
        let ray = Ray::new(Point3::new(-10.0, 100.0, 0.0), Vector3::x());
        assert!(tracker.raycast(&ray, None).is_none());
    }

    #[test]
    fn replace_proxy_swaps_surface() {
        let mut tracker = double_sheet_tracker();
        let source = cube_mesh(1.0);
        let plane = estimate_reference_plane(None, &source);
        let proxy = build_proxy_surface(&plane, &source, &ProxyConfig::preview()).unwrap();
        tracker.replace_proxy(proxy, plane);
        assert!(tracker.project_spherical(1.0, 0.7, None).is_some());
    }
}
