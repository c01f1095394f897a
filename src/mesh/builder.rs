//! Mesh construction utilities.
//!
//! The algorithms that normally produce a half-edge graph (hull construction,
//! triangulation, mesh editing) live outside this crate and register entities
//! directly through [`HalfEdgeMesh`]. The functions here cover the common case
//! of starting from an indexed triangle list.
//!
//! Every face `[a, b, c]` becomes three half-edges whose destination vertices
//! are `a`, `b`, `c` in that order, so walking a face's cycle from its stored
//! half-edge reproduces the input winding. Twins are linked wherever the
//! reversed directed edge occurs in another face; edges on an open border
//! keep no twin.

use std::collections::HashMap;

use log::debug;
use nalgebra::{Point3, Vector3};

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
use super::index::{HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and triangle faces.
///
/// Each input vertex becomes one mesh vertex shared by all faces using it.
/// No normals are assigned.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of triangle faces, each as [v0, v1, v2] indices
///
/// # Example
/// ```
/// use hemesh::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_halfedges(), 3);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    validate_faces::<I>(vertices.len(), vertices.len(), faces)?;

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());
    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    assemble(&mut mesh, faces, |_, _, vi| vertex_ids[vi])?;
    Ok(mesh)
}

/// Build a half-edge mesh from vertices with per-vertex normals.
///
/// Like [`build_from_triangles`], but every vertex carries the matching
/// entry of `normals`.
pub fn build_from_triangles_with_normals<I: MeshIndex>(
    vertices: &[Point3<f64>],
    normals: &[Vector3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    if normals.len() != vertices.len() {
        return Err(MeshError::AttributeCountMismatch {
            attribute: "normals",
            expected: vertices.len(),
            found: normals.len(),
        });
    }
    validate_faces::<I>(vertices.len(), vertices.len(), faces)?;

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());
    let vertex_ids: Vec<VertexId<I>> = vertices
        .iter()
        .zip(normals)
        .map(|(&p, &n)| mesh.add_vertex_with_normal(p, n))
        .collect();

    assemble(&mut mesh, faces, |_, _, vi| vertex_ids[vi])?;
    Ok(mesh)
}

/// Build a flat-shaded half-edge mesh.
///
/// Every face corner gets its own vertex carrying the face normal, which is
/// the usual output of hull and triangulation code. Vertices of neighbouring
/// faces are distinct entities that merely share a position; twins are still
/// linked through the input indices. A degenerate face leaves its corner
/// normals unset.
pub fn build_flat_shaded<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    validate_faces::<I>(vertices.len(), faces.len().saturating_mul(3), faces)?;

    let mut mesh = HalfEdgeMesh::with_capacity(faces.len() * 3, faces.len());
    assemble(&mut mesh, faces, |mesh, face, vi| {
        let [a, b, c] = face.map(|i| vertices[i]);
        let mut vertex = Vertex::new(vertices[vi]);
        vertex.normal = (b - a).cross(&(c - a)).try_normalize(f64::EPSILON);
        mesh.push_vertex(vertex)
    })?;
    Ok(mesh)
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Vertices are reported by handle, without merging equal positions.
/// Returns (vertices, faces) tuple.
pub fn to_face_vertex<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
) -> Result<(Vec<Point3<f64>>, Vec<[usize; 3]>)> {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

    let faces = mesh
        .face_ids()
        .map(|f| Ok(mesh.face_corners(f)?.map(VertexId::index)))
        .collect::<Result<Vec<[usize; 3]>>>()?;

    Ok((vertices, faces))
}

/// Check the triangle list against `num_vertices` input vertices.
///
/// `mesh_vertices` is how many vertices the built mesh will hold, which
/// together with the half-edge and face counts must fit in `I`.
fn validate_faces<I: MeshIndex>(
    num_vertices: usize,
    mesh_vertices: usize,
    faces: &[[usize; 3]],
) -> Result<()> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    check_capacity::<I>("vertices", mesh_vertices)?;
    check_capacity::<I>("half-edges", faces.len().saturating_mul(3))?;
    check_capacity::<I>("faces", faces.len())?;

    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= num_vertices {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

fn check_capacity<I: MeshIndex>(element: &'static str, count: usize) -> Result<()> {
    let max = I::MAX.to_usize().saturating_add(1);
    if count > max {
        return Err(MeshError::TooManyElements { element, count, max });
    }
    Ok(())
}

/// Create faces and half-edges for `faces` and link twins.
///
/// `corner` supplies the mesh vertex for corner `vi` of the given face; it is
/// called once per corner in face order.
fn assemble<I, F>(mesh: &mut HalfEdgeMesh<I>, faces: &[[usize; 3]], mut corner: F) -> Result<()>
where
    I: MeshIndex,
    F: FnMut(&mut HalfEdgeMesh<I>, &[usize; 3], usize) -> VertexId<I>,
{
    // Directed edge (origin, dest) in input indices -> half-edge
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::with_capacity(faces.len() * 3);

    for face in faces {
        let corners = [
            corner(mesh, face, face[0]),
            corner(mesh, face, face[1]),
            corner(mesh, face, face[2]),
        ];

        let base = mesh.num_halfedges();
        let ids: [HalfEdgeId<I>; 3] = [
            HalfEdgeId::new(base),
            HalfEdgeId::new(base + 1),
            HalfEdgeId::new(base + 2),
        ];
        let face_id = mesh.add_face(Face::new(ids[0]));

        for k in 0..3 {
            let he = mesh.add_halfedge(HalfEdge {
                vertex: corners[k],
                face: face_id,
                next: ids[(k + 1) % 3],
                prev: ids[(k + 2) % 3],
                twin: HalfEdgeId::invalid(),
            });
            debug_assert_eq!(he, ids[k]);

            // Half-edge k runs from corner k-1 to corner k, so the vertex at
            // corner k leaves through half-edge k+1.
            mesh.vertex_mut(corners[k]).halfedge = ids[(k + 1) % 3];

            let key = (face[(k + 2) % 3], face[k]);
            if edge_map.insert(key, he).is_some() {
                return Err(MeshError::NonManifoldEdge { v0: key.0, v1: key.1 });
            }
        }
    }

    for (&(v0, v1), &he) in &edge_map {
        if let Some(&twin) = edge_map.get(&(v1, v0)) {
            mesh.halfedge_mut(he).twin = twin;
        }
    }

    debug!(
        "assembled half-edge mesh: {} vertices, {} faces, {} half-edges ({} boundary)",
        mesh.num_vertices(),
        mesh.num_faces(),
        mesh.num_halfedges(),
        mesh.num_boundary_halfedges()
    );
    Ok(())
}
