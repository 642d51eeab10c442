//! Hemispherical dome tessellation.

use std::f64::consts::{FRAC_PI_2, TAU};

use scalp_types::{SurfaceMesh, Vertex};

use scalp_plane::ReferencePlane;

use crate::config::ProxyConfig;

/// A tessellated dome plus per-vertex rim flags.
pub(crate) struct Dome {
    pub mesh: SurfaceMesh,
    /// True for vertices within the rim margin of the equator.
    pub rim: Vec<bool>,
}

/// Tessellate a hemisphere of radius `base_radius x radius_scale` with its
/// pole on the plane normal and its equator in the plane.
///
/// Layout: `rings` latitude bands of `segments` vertices each (ring 0 on the
/// equator), plus a single shared apex vertex at the pole. Faces wind CCW
/// viewed from outside.
pub(crate) fn generate_dome(plane: &ReferencePlane, config: &ProxyConfig) -> Dome {
    let rings = config.rings as usize;
    let segments = config.segments as usize;
    let radius = plane.base_radius * config.radius_scale;

    let vertex_count = rings * segments + 1;
    let face_count = 2 * (rings - 1) * segments + segments;
    let mut mesh = SurfaceMesh::with_capacity(vertex_count, face_count);
    let mut rim = Vec::with_capacity(vertex_count);

    let pitch_step = FRAC_PI_2 / config.rings as f64;
    let yaw_step = TAU / config.segments as f64;

    for ring in 0..rings {
        #[allow(clippy::cast_precision_loss)]
        let pitch = ring as f64 * pitch_step;
        for segment in 0..segments {
            #[allow(clippy::cast_precision_loss)]
            let yaw = segment as f64 * yaw_step;
            let position = plane.origin + plane.spherical_direction(yaw, pitch) * radius;
            mesh.vertices.push(Vertex::new(position));
            rim.push(pitch <= config.rim_margin);
        }
    }

    // Apex
    let apex = mesh.vertices.len() as u32;
    mesh.vertices
        .push(Vertex::new(plane.origin + plane.normal * radius));
    rim.push(false);

    #[allow(clippy::cast_possible_truncation)]
    let index = |ring: usize, segment: usize| (ring * segments + segment % segments) as u32;

    // Quads between consecutive rings
    for ring in 0..rings - 1 {
        for segment in 0..segments {
            let a = index(ring, segment);
            let b = index(ring, segment + 1);
            let c = index(ring + 1, segment + 1);
            let d = index(ring + 1, segment);
            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        }
    }

    // Fan to the apex
    for segment in 0..segments {
        let a = index(rings - 1, segment);
        let b = index(rings - 1, segment + 1);
        mesh.faces.push([a, b, apex]);
    }

    Dome { mesh, rim }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn test_plane() -> ReferencePlane {
        scalp_plane::estimate_reference_plane(None, &SurfaceMesh::new())
    }

    #[test]
    fn dome_counts_match_tessellation() {
        let config = ProxyConfig::default().with_tessellation(4, 6);
        let dome = generate_dome(&test_plane(), &config);
        assert_eq!(dome.mesh.vertex_count(), 4 * 6 + 1);
        assert_eq!(dome.mesh.face_count(), 2 * 3 * 6 + 6);
        assert_eq!(dome.rim.len(), dome.mesh.vertex_count());
    }

    #[test]
    fn ring_zero_is_rim() {
        let config = ProxyConfig::default().with_tessellation(4, 6);
        let dome = generate_dome(&test_plane(), &config);
        for segment in 0..6 {
            assert!(dome.rim[segment]);
        }
        assert!(!dome.rim[6]); // first vertex of ring 1
    }

    #[test]
    fn vertices_lie_on_scaled_sphere() {
        let plane = test_plane();
        let config = ProxyConfig::default().with_tessellation(8, 12);
        let dome = generate_dome(&plane, &config);
        let radius = plane.base_radius * config.radius_scale;
        for v in &dome.mesh.vertices {
            assert_relative_eq!((v.position - plane.origin).norm(), radius, epsilon = 1e-10);
        }
    }

    #[test]
    fn faces_wind_outward() {
        let plane = test_plane();
        let config = ProxyConfig::default().with_tessellation(8, 12);
        let dome = generate_dome(&plane, &config);
        for tri in dome.mesh.triangles() {
            let outward: Vector3<f64> = tri.centroid() - plane.origin;
            let normal = tri.normal().unwrap();
            assert!(
                normal.dot(&outward) > 0.0,
                "face normal points into the dome"
            );
        }
    }
}
