//! Proxy-surface build pipeline.

use nalgebra::Point3;
use tracing::debug;

use scalp_plane::ReferencePlane;
use scalp_types::{Ray, SurfaceMesh};

use crate::adjacency::VertexAdjacency;
use crate::config::ProxyConfig;
use crate::dome::generate_dome;
use crate::error::ProxyError;

/// Height of the interior projection center above the plane origin, as a
/// fraction of the base radius. Sits inside the cranial vault for head-like
/// meshes so every dome vertex sees the scalp along an outward ray.
pub const INTERIOR_HEIGHT_FRACTION: f64 = 0.25;

/// Tolerance for the ray-triangle parallel test.
const RAY_EPSILON: f64 = 1e-12;

/// The interior center point that projection rays originate from.
#[must_use]
pub fn interior_center(plane: &ReferencePlane) -> Point3<f64> {
    plane.origin + plane.normal * (INTERIOR_HEIGHT_FRACTION * plane.base_radius)
}

/// Build the smoothed proxy surface for a source mesh.
///
/// See the crate docs for the pipeline. The returned mesh is a complete
/// replacement; callers swap it in atomically and never mutate it afterwards.
///
/// # Errors
///
/// Returns [`ProxyError::EmptySourceMesh`] when the source has no faces, or
/// a validation error from [`ProxyConfig::validate`]. Per-vertex ray misses
/// are not errors; missed vertices keep their dome position.
pub fn build_proxy_surface(
    plane: &ReferencePlane,
    source: &SurfaceMesh,
    config: &ProxyConfig,
) -> Result<SurfaceMesh, ProxyError> {
    config.validate()?;
    if source.is_empty() {
        return Err(ProxyError::EmptySourceMesh);
    }

    let mut dome = generate_dome(plane, config);
    let center = interior_center(plane);
    let mut misses = 0_usize;

    for (index, vertex) in dome.mesh.vertices.iter_mut().enumerate() {
        if dome.rim[index] {
            pin_to_base_circle(&mut vertex.position, plane);
            continue;
        }

        let Some(direction) = (vertex.position - center).try_normalize(f64::EPSILON) else {
            misses += 1;
            continue;
        };
        let ray = Ray::new(center, direction);

        if let Some((t, face)) = nearest_hit(source, &ray) {
            let hit_point = ray.point_at(t);
            // Face normal corrected to point away from the interior center
            let normal = source
                .triangle(face)
                .and_then(|tri| tri.normal())
                .map(|n| {
                    if n.dot(&(hit_point - center)) < 0.0 {
                        -n
                    } else {
                        n
                    }
                });
            match normal {
                Some(normal) => vertex.position = hit_point + normal * config.offset,
                // Degenerate source triangle: take the hit point as-is
                None => vertex.position = hit_point,
            }
        } else {
            misses += 1;
        }
    }

    if misses > 0 {
        debug!(misses, "dome vertices kept at dome radius (no source intersection)");
    }

    let adjacency = VertexAdjacency::build(&dome.mesh.faces);
    smooth_vertices(&mut dome.mesh, &adjacency, &dome.rim, config);

    let mut proxy = dome.mesh;
    proxy.recompute_vertex_normals();
    proxy.orient_normals_away_from(&center);

    debug!(
        vertices = proxy.vertex_count(),
        faces = proxy.face_count(),
        "proxy surface built"
    );
    Ok(proxy)
}

/// Project a rim vertex radially in-plane onto the base circle.
fn pin_to_base_circle(position: &mut Point3<f64>, plane: &ReferencePlane) {
    let d = *position - plane.origin;
    let planar = d - plane.normal * d.dot(&plane.normal);
    let direction = planar.try_normalize(f64::EPSILON).unwrap_or(plane.u);
    *position = plane.origin + direction * plane.base_radius;
}

/// The nearest source-mesh intersection along a ray.
fn nearest_hit(source: &SurfaceMesh, ray: &Ray) -> Option<(f64, usize)> {
    let mut nearest: Option<(f64, usize)> = None;
    for (face, tri) in source.triangles().enumerate() {
        if let Some(t) = tri.ray_intersect(ray, RAY_EPSILON) {
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, face));
            }
        }
    }
    nearest
}

/// Uniform Laplacian smoothing with pinned rim vertices.
///
/// `v <- v + lambda * (neighbor_centroid - v)`, one synchronous pass per
/// iteration (all centroids read from the previous iteration's positions).
fn smooth_vertices(
    mesh: &mut SurfaceMesh,
    adjacency: &VertexAdjacency,
    pinned: &[bool],
    config: &ProxyConfig,
) {
    for _ in 0..config.smoothing_iterations {
        let positions: Vec<Point3<f64>> = mesh.vertices.iter().map(|v| v.position).collect();

        for (index, vertex) in mesh.vertices.iter_mut().enumerate() {
            if pinned[index] {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let neighbors = adjacency.neighbors(index as u32);
            if neighbors.is_empty() {
                continue;
            }

            let mut centroid = nalgebra::Vector3::zeros();
            for &n in neighbors {
                centroid += positions[n as usize].coords;
            }
            #[allow(clippy::cast_precision_loss)]
            let centroid = Point3::from(centroid / neighbors.len() as f64);

            vertex.position += (centroid - vertex.position) * config.smoothing_weight;
        }
    }
}
