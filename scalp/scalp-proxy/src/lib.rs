//! Smoothed proxy-surface construction.
//!
//! The coarse source head mesh has hard triangle-edge normal
//! discontinuities that make a tracked point stutter as it crosses facets.
//! This crate builds a **proxy surface**: a hemispherical dome shrink-wrapped
//! onto the source mesh at a small outward offset, Laplacian-smoothed, with
//! clean smooth normals. The proxy is the only surface the movement stack
//! ever queries.
//!
//! # Pipeline
//!
//! 1. Tessellate a dome of radius `base_radius x radius_scale` with its pole
//!    on the reference-plane normal.
//! 2. Project every non-rim vertex onto the source mesh along a ray from an
//!    interior center point, then push it out by `offset`. Rim vertices are
//!    instead pinned to the base circle, guaranteeing a flat boundary. Ray
//!    misses are non-fatal; the vertex keeps its dome position.
//! 3. Run uniform Laplacian smoothing over the vertex-adjacency graph,
//!    with rim vertices pinned.
//! 4. Recompute smooth vertex normals, oriented away from the head.
//!
//! Rebuilds are wholesale: a new mesh is returned, never an in-place patch.
//!
//! # Example
//!
//! ```
//! use scalp_plane::estimate_reference_plane;
//! use scalp_proxy::{build_proxy_surface, ProxyConfig};
//! use scalp_types::SurfaceMesh;
//!
//! // An octahedron standing in for a (very) coarse head scan.
//! let positions = [
//!     1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
//!     0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
//! ];
//! let indices = [
//!     0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4,
//!     2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
//! ];
//! let source = SurfaceMesh::from_raw(&positions, &indices);
//!
//! let plane = estimate_reference_plane(None, &source);
//! let proxy = build_proxy_surface(&plane, &source, &ProxyConfig::preview()).unwrap();
//! assert!(!proxy.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod build;
mod config;
mod dome;
mod error;

pub use adjacency::VertexAdjacency;
pub use build::{build_proxy_surface, interior_center, INTERIOR_HEIGHT_FRACTION};
pub use config::ProxyConfig;
pub use error::ProxyError;
