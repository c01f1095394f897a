//! Core mesh data structures.
//!
//! This module provides the half-edge graph and related types for
//! representing triangle meshes.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which stores vertices, directed
//! half-edges and faces in index-addressed arenas. All references between
//! entities are typed handles rather than pointers, so the cyclic
//! vertex/edge/face graph carries no ownership cycles.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe handles:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! External algorithms register entities one by one through
//! [`HalfEdgeMesh::add_vertex`], [`HalfEdgeMesh::add_halfedge`] and
//! [`HalfEdgeMesh::add_face`]. For indexed triangle lists use the builders:
//!
//! ```
//! use hemesh::mesh::{HalfEdgeMesh, build_flat_shaded};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_flat_shaded(&vertices, &faces).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod builder;
mod halfedge;
mod index;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{
    build_flat_shaded, build_from_triangles, build_from_triangles_with_normals, to_face_vertex,
};
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
