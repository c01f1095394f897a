//! Read-only algorithms over a populated half-edge mesh.
//!
//! - **Unique edges**: one representative half-edge per undirected edge
//! - **Conversion**: indexed triangle output through an injected builder
//!
//! Neither algorithm mutates the mesh, and both fail on malformed topology
//! instead of returning partial results.

pub mod convert;
pub mod unique_edges;

pub use convert::convert_to_mesh;
pub use unique_edges::{unique_edges, UniqueEdgeOptions, UniqueEdgeStrategy};
