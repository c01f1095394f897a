//! Conversion to an indexed triangle mesh.
//!
//! Each face is read by walking `edge`, `next(edge)`, `next(next(edge))` and
//! taking the destination vertex of each step. That walk is the face's
//! winding order and is carried over unchanged. Normals are copied as stored,
//! never recomputed.

use log::{debug, trace};

use crate::error::Result;
use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId};
use crate::render::{IndexedMeshBuilder, MeshVertex};

/// Convert a triangular half-edge mesh through `builder`.
///
/// Faces are emitted in handle order. Every face is checked before the first
/// vertex reaches the builder, so a malformed mesh leaves it untouched.
///
/// # Errors
///
/// Fails if any face is not a closed three-cycle or references a missing
/// half-edge or vertex.
///
/// # Example
///
/// ```
/// use hemesh::prelude::*;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh = build_flat_shaded(&vertices, &[[0, 1, 2]]).unwrap();
///
/// let out = convert_to_mesh(&mesh, "triangle", TriangleMeshBuilder::new()).unwrap();
/// assert_eq!(out.name, "triangle");
/// assert_eq!(out.triangles, vec![[0, 1, 2]]);
/// assert!(out.has_normals());
/// ```
pub fn convert_to_mesh<I, B>(mesh: &HalfEdgeMesh<I>, name: &str, mut builder: B) -> Result<B::Output>
where
    I: MeshIndex,
    B: IndexedMeshBuilder,
{
    let triangles = mesh
        .face_ids()
        .map(|f| mesh.face_corners(f))
        .collect::<Result<Vec<[VertexId<I>; 3]>>>()?;

    for corners in &triangles {
        let indices = corners.map(|v| builder.add_vertex(MeshVertex::from(mesh.vertex(v))));
        trace!("{:?} -> {:?}", corners, indices);
        builder.add_triangle(indices);
    }

    debug!(
        "converted '{}': {} faces from {} vertices",
        name,
        triangles.len(),
        mesh.num_vertices()
    );
    Ok(builder.build(name))
}
