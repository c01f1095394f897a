//! Shared test meshes.

use nalgebra::Point3;

use super::builder::{build_flat_shaded, build_from_triangles};
use super::halfedge::{Face, HalfEdge, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId};

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn triangle_input() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
    ];
    (vertices, vec![[0, 1, 2]])
}

/// Unit cube, two triangles per side, consistently oriented.
pub(crate) fn cube_input() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let quads = [
        [0, 3, 2, 1], // bottom
        [4, 5, 6, 7], // top
        [0, 1, 5, 4], // front
        [2, 3, 7, 6], // back
        [0, 4, 7, 3], // left
        [1, 2, 6, 5], // right
    ];
    let faces = quads
        .iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
        .collect();
    (vertices, faces)
}

pub(crate) fn tetrahedron_input() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
        Point3::new(0.5, 0.5, 1.0),
    ];
    let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
    (vertices, faces)
}

/// An `n` x `m` grid of unit squares in the z = 0 plane, two triangles each.
pub(crate) fn grid_input(n: usize, m: usize) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let mut vertices = Vec::with_capacity((n + 1) * (m + 1));
    for j in 0..=m {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(n * m * 2);
    for j in 0..m {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }
    (vertices, faces)
}

pub(crate) fn single_triangle() -> HalfEdgeMesh<u32> {
    let (vertices, faces) = triangle_input();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Cube with 8 shared vertices and no normals.
pub(crate) fn cube() -> HalfEdgeMesh<u32> {
    let (vertices, faces) = cube_input();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Cube with one vertex per face corner carrying the face normal.
pub(crate) fn flat_cube() -> HalfEdgeMesh<u32> {
    let (vertices, faces) = cube_input();
    build_flat_shaded(&vertices, &faces).unwrap()
}

pub(crate) fn tetrahedron() -> HalfEdgeMesh<u32> {
    let (vertices, faces) = tetrahedron_input();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// A triangle wired up by hand through the registration API.
pub(crate) fn registered_triangle() -> HalfEdgeMesh<u32> {
    registered_polygon(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ])
}

/// A single quad face, which the triangle-only algorithms must reject.
pub(crate) fn registered_quad() -> HalfEdgeMesh<u32> {
    registered_polygon(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ])
}

fn registered_polygon(positions: &[Point3<f64>]) -> HalfEdgeMesh<u32> {
    let n = positions.len();
    let mut mesh = HalfEdgeMesh::new();
    let vertices: Vec<_> = positions.iter().map(|&p| mesh.add_vertex(p)).collect();

    let face = mesh.add_face(Face::new(HalfEdgeId::new(0)));
    for (k, &v) in vertices.iter().enumerate() {
        let mut he = HalfEdge::towards(v);
        he.face = face;
        he.next = HalfEdgeId::new((k + 1) % n);
        he.prev = HalfEdgeId::new((k + n - 1) % n);
        mesh.add_halfedge(he);
        mesh.vertex_mut(v).halfedge = HalfEdgeId::new((k + 1) % n);
    }
    debug_assert_eq!(face, FaceId::new(0));
    mesh
}
