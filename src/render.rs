//! Indexed triangle mesh output.
//!
//! Converting a half-edge mesh for rendering goes through the
//! [`IndexedMeshBuilder`] trait: the conversion emits one [`MeshVertex`] per
//! face corner and one index triple per face, and the builder decides how
//! vertices are shared and what the final mesh object looks like. Engine
//! specific mesh types stay behind that trait.
//!
//! [`TriangleMeshBuilder`] is the bundled implementation. It shares a vertex
//! index whenever an identical (position, normal) pair was already emitted
//! and produces a plain [`TriangleMesh`].

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::key::{point_key, vector_key, Vec3Key};
use crate::mesh::{MeshIndex, Vertex};

/// A vertex record handed to an [`IndexedMeshBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    /// Vertex position.
    pub position: Point3<f64>,
    /// Vertex normal, `None` if the source vertex had none.
    pub normal: Option<Vector3<f64>>,
}

impl MeshVertex {
    /// Create a new vertex record.
    pub fn new(position: Point3<f64>, normal: Option<Vector3<f64>>) -> Self {
        Self { position, normal }
    }

    fn key(&self) -> (Vec3Key, Option<Vec3Key>) {
        (point_key(&self.position), self.normal.as_ref().map(vector_key))
    }
}

impl<I: MeshIndex> From<&Vertex<I>> for MeshVertex {
    fn from(v: &Vertex<I>) -> Self {
        Self::new(v.position, v.normal)
    }
}

/// Capability for assembling an indexed triangle mesh.
pub trait IndexedMeshBuilder {
    /// The finished mesh type.
    type Output;

    /// Add a vertex and return the index it can be referenced by.
    fn add_vertex(&mut self, vertex: MeshVertex) -> usize;

    /// Add a triangle over previously returned vertex indices.
    fn add_triangle(&mut self, indices: [usize; 3]);

    /// Materialise the mesh under the given name.
    fn build(self, name: &str) -> Self::Output;
}

/// An indexed triangle mesh ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Mesh name.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Vertex normals, parallel to `positions`. Never generated.
    pub normals: Vec<Option<Vector3<f64>>>,
    /// Triangles as indices into the vertex arrays, in source winding order.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Get the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Get vertex `i` as a record.
    pub fn vertex(&self, i: usize) -> MeshVertex {
        MeshVertex::new(self.positions[i], self.normals[i])
    }

    /// Get the corner positions of triangle `t`.
    pub fn triangle_positions(&self, t: usize) -> [Point3<f64>; 3] {
        self.triangles[t].map(|i| self.positions[i as usize])
    }

    /// Check whether every vertex carries a normal.
    pub fn has_normals(&self) -> bool {
        self.normals.iter().all(Option::is_some)
    }

    /// Flatten the index buffer, three entries per triangle.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// Builder producing a [`TriangleMesh`].
///
/// # Example
///
/// ```
/// use hemesh::render::{IndexedMeshBuilder, MeshVertex, TriangleMeshBuilder};
/// use nalgebra::Point3;
///
/// let mut builder = TriangleMeshBuilder::new();
/// let a = builder.add_vertex(MeshVertex::new(Point3::new(0.0, 0.0, 0.0), None));
/// let b = builder.add_vertex(MeshVertex::new(Point3::new(0.0, 0.0, 0.0), None));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct TriangleMeshBuilder {
    mesh: TriangleMesh,
    share_vertices: bool,
    lookup: HashMap<(Vec3Key, Option<Vec3Key>), usize>,
}

impl Default for TriangleMeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TriangleMeshBuilder {
    /// Create a builder that shares identical vertices.
    pub fn new() -> Self {
        Self {
            mesh: TriangleMesh::default(),
            share_vertices: true,
            lookup: HashMap::new(),
        }
    }

    /// Set whether identical (position, normal) pairs share one index.
    pub fn with_shared_vertices(mut self, share: bool) -> Self {
        self.share_vertices = share;
        self
    }

    /// Pre-allocate room for `vertices` vertices and `triangles` triangles.
    pub fn with_capacity(mut self, vertices: usize, triangles: usize) -> Self {
        self.mesh.positions.reserve(vertices);
        self.mesh.normals.reserve(vertices);
        self.mesh.triangles.reserve(triangles);
        self
    }

    fn push(&mut self, vertex: MeshVertex) -> usize {
        let index = self.mesh.positions.len();
        self.mesh.positions.push(vertex.position);
        self.mesh.normals.push(vertex.normal);
        index
    }
}

impl IndexedMeshBuilder for TriangleMeshBuilder {
    type Output = TriangleMesh;

    fn add_vertex(&mut self, vertex: MeshVertex) -> usize {
        if !self.share_vertices {
            return self.push(vertex);
        }
        let key = vertex.key();
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.push(vertex);
        self.lookup.insert(key, index);
        index
    }

    fn add_triangle(&mut self, indices: [usize; 3]) {
        debug_assert!(indices.iter().all(|&i| i < self.mesh.positions.len()));
        debug_assert!(self.mesh.positions.len() <= u32::MAX as usize);
        self.mesh.triangles.push(indices.map(|i| i as u32));
    }

    fn build(mut self, name: &str) -> TriangleMesh {
        self.mesh.name = name.to_string();
        self.mesh
    }
}
