//! # hemesh
//!
//! A half-edge mesh graph for triangle meshes, used as the working
//! representation inside geometry processing code and converted to a flat
//! indexed triangle mesh for rendering.
//!
//! ## Features
//!
//! - **Half-edge graph**: vertices, faces and directed half-edges with
//!   next/prev/twin links, stored in arenas addressed by type-safe handles
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit handles
//! - **Unique edge extraction**: one representative per undirected edge
//! - **Indexed mesh conversion**: winding-preserving output with vertex
//!   sharing by (position, normal) value
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use hemesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! let mesh: HalfEdgeMesh = build_flat_shaded(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_faces(), 4);
//! assert_eq!(mesh.num_halfedges(), 12);
//! ```
//!
//! ## Querying and Converting
//!
//! ```
//! use hemesh::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! #     Point3::new(0.5, 0.5, 1.0),
//! # ];
//! # let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
//! # let mesh: HalfEdgeMesh = build_flat_shaded(&vertices, &faces).unwrap();
//! // Each of the 6 edges once
//! let edges = mesh.unique_edges().unwrap();
//! assert_eq!(edges.len(), 6);
//!
//! // Corners of a face in winding order
//! let [a, b, c] = mesh.face_corners(FaceId::new(0)).unwrap();
//! println!("{:?} {:?} {:?}", a, b, c);
//!
//! let out = mesh.convert_to_mesh("tetrahedron", TriangleMeshBuilder::new()).unwrap();
//! assert_eq!(out.num_triangles(), 4);
//! assert_eq!(out.num_vertices(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
mod key;
pub mod mesh;
pub mod render;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use hemesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{convert_to_mesh, unique_edges, UniqueEdgeOptions, UniqueEdgeStrategy};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_flat_shaded, build_from_triangles, build_from_triangles_with_normals, Face, FaceId,
        HalfEdge, HalfEdgeId, HalfEdgeMesh, MeshIndex, Vertex, VertexId,
    };
    pub use crate::render::{IndexedMeshBuilder, MeshVertex, TriangleMesh, TriangleMeshBuilder};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
