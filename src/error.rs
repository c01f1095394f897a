//! Error types for hemesh.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Which face-cycle link of a half-edge an operation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// The `next` half-edge around the face.
    Next,
    /// The `prev` half-edge around the face.
    Prev,
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Link::Next => f.write_str("next"),
            Link::Prev => f.write_str("prev"),
        }
    }
}

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The same directed edge is used by more than one face.
    #[error("directed edge ({v0}, {v1}) is used by more than one face")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// The input needs more elements than the index type can address.
    #[error("{count} {element} exceed the index type limit of {max}")]
    TooManyElements {
        /// The kind of element ("vertices", "half-edges" or "faces").
        element: &'static str,
        /// Number of elements the input requires.
        count: usize,
        /// Largest element count the index type supports.
        max: usize,
    },

    /// A per-vertex attribute list does not match the vertex list.
    #[error("expected {expected} {attribute}, found {found}")]
    AttributeCountMismatch {
        /// The attribute name.
        attribute: &'static str,
        /// Number of vertices.
        expected: usize,
        /// Number of attribute values supplied.
        found: usize,
    },

    /// A half-edge lacks a face-cycle link the operation requires.
    #[error("half-edge {halfedge} has no {link} half-edge")]
    MissingLink {
        /// The half-edge index.
        halfedge: usize,
        /// The missing link.
        link: Link,
    },

    /// A face has no boundary half-edge.
    #[error("face {face} has no boundary half-edge")]
    MissingFaceEdge {
        /// The face index.
        face: usize,
    },

    /// A face cycle does not close after exactly three steps.
    #[error("face {face} is not a triangle (boundary cycle length {len})")]
    NonTriangularFace {
        /// The face index.
        face: usize,
        /// Cycle length if the cycle closes. Otherwise the number of
        /// half-edges walked before hitting a broken link or the mesh's
        /// half-edge count.
        len: usize,
    },

    /// Any other inconsistency in the half-edge graph.
    #[error("malformed topology: {0}")]
    MalformedTopology(String),
}

impl MeshError {
    /// Create a malformed topology error.
    pub fn malformed(details: impl Into<String>) -> Self {
        MeshError::MalformedTopology(details.into())
    }

    /// Whether this error describes a broken half-edge graph, as opposed to
    /// bad builder input.
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            MeshError::MissingLink { .. }
                | MeshError::MissingFaceEdge { .. }
                | MeshError::NonTriangularFace { .. }
                | MeshError::MalformedTopology(_)
        )
    }
}
