//! Core surface-mesh types for NeuroGlide.
//!
//! This crate provides the foundational geometry types shared by the
//! scalp-surface stack:
//!
//! - [`Vertex`] - A point in 3D space with an optional unit normal
//! - [`SurfaceMesh`] - An indexed triangle mesh
//! - [`Triangle`] - A concrete triangle with ray-intersection support
//! - [`Aabb`] / [`BoundingSphere`] - Bounding volumes
//! - [`Ray`] / [`SurfaceHit`] - Ray queries and their results
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`. Downstream
//! crates assume head-scale units where a scalp radius is on the order of
//! `0.1`.
//!
//! # Coordinate System
//!
//! Right-handed, Y-up. Face winding is **counter-clockwise (CCW) when viewed
//! from outside**; normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use scalp_types::{SurfaceMesh, Vertex};
//!
//! let mut mesh = SurfaceMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod ray;
mod triangle;
mod vertex;

pub use bounds::{Aabb, BoundingSphere};
pub use mesh::SurfaceMesh;
pub use ray::{Ray, SurfaceHit};
pub use triangle::{Triangle, TriangleIntersection};
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
