//! Plane estimation with degenerate-input fallback.

use nalgebra::Vector3;
use tracing::{debug, warn};

use scalp_types::SurfaceMesh;

use crate::{FiducialSet, ReferencePlane};

/// Minimum pairwise fiducial distance (and minimum base radius) accepted as
/// valid, in mesh units. Anything closer is treated as a corrupted
/// registration.
pub const MIN_FIDUCIAL_SPACING: f64 = 0.01;

/// Fraction of the mesh bounding-sphere radius used as the fallback base
/// radius. The bounding sphere of a full head overshoots the scalp ring at
/// the fiducial plane, so the fallback shrinks it.
pub const FALLBACK_RADIUS_SCALE: f64 = 0.55;

/// Estimate the session reference plane.
///
/// Uses the fiducials when they pass the degeneracy checks; otherwise falls
/// back to a plane derived from the source mesh's bounding sphere (origin at
/// the sphere center, normal `+Y`). This function never fails - with no
/// fiducials and an empty mesh it still produces a usable unit-scale plane.
///
/// # Example
///
/// ```
/// use scalp_plane::estimate_reference_plane;
/// use scalp_types::SurfaceMesh;
///
/// // No fiducials, no mesh: still a valid plane.
/// let plane = estimate_reference_plane(None, &SurfaceMesh::new());
/// assert!(plane.base_radius > 0.0);
/// ```
#[must_use]
pub fn estimate_reference_plane(
    fiducials: Option<&FiducialSet>,
    source: &SurfaceMesh,
) -> ReferencePlane {
    if let Some(fiducials) = fiducials {
        if let Some(plane) = plane_from_fiducials(fiducials) {
            debug!(
                base_radius = plane.base_radius,
                "reference plane estimated from fiducials"
            );
            return plane;
        }
        warn!("degenerate fiducials, falling back to mesh bounding sphere");
    }
    plane_from_mesh(source)
}

/// Derive the plane from the four landmarks.
///
/// Returns `None` when the landmarks are too close together, collinear, or
/// yield a sub-threshold base radius.
fn plane_from_fiducials(fiducials: &FiducialSet) -> Option<ReferencePlane> {
    if fiducials.min_pairwise_distance() < MIN_FIDUCIAL_SPACING {
        return None;
    }

    let origin = fiducials.centroid();
    let anterior = fiducials.anterior_axis();
    let lateral = fiducials.lateral_axis();

    let mut normal = anterior.cross(&lateral).try_normalize(f64::EPSILON)?;
    // Orient the normal to have a positive up component
    if normal.y < 0.0 {
        normal = -normal;
    }

    let u = (anterior - normal * anterior.dot(&normal)).try_normalize(f64::EPSILON)?;
    let v = normal.cross(&u);

    let plane = ReferencePlane {
        origin,
        u,
        v,
        normal,
        base_radius: 0.0,
    };
    let base_radius = fiducials
        .points()
        .iter()
        .map(|p| plane.in_plane_distance(p))
        .sum::<f64>()
        / 4.0;

    if base_radius < MIN_FIDUCIAL_SPACING {
        return None;
    }

    Some(ReferencePlane {
        base_radius,
        ..plane
    })
}

/// Fallback plane from the mesh bounding sphere.
///
/// An empty mesh yields a unit-scale plane at the world origin.
fn plane_from_mesh(source: &SurfaceMesh) -> ReferencePlane {
    let (center, radius) = source
        .bounding_sphere()
        .filter(|s| s.radius > f64::EPSILON)
        .map_or((nalgebra::Point3::origin(), 1.0), |s| (s.center, s.radius));

    let normal = Vector3::y();
    let u = Vector3::x();
    ReferencePlane {
        origin: center,
        u,
        v: normal.cross(&u),
        normal,
        base_radius: FALLBACK_RADIUS_SCALE * radius,
    }
}
