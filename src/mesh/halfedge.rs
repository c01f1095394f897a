//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) graph for
//! triangle meshes. Vertices, half-edges and faces are stored in flat arenas
//! and reference each other through typed handles.
//!
//! # Structure
//!
//! - Each half-edge points to its **destination vertex**, knows the **face**
//!   it bounds, the **next** and **previous** half-edge around that face, and
//!   optionally its **twin** (the antiparallel half-edge of the neighbouring
//!   face)
//! - Each vertex stores its position, an optional normal and one outgoing
//!   half-edge
//! - Each face stores one half-edge on its boundary
//!
//! # Boundary Handling
//!
//! No boundary half-edges are materialised. A half-edge on an open border of
//! the mesh simply has no twin.
//!
//! # Snapshot Semantics
//!
//! The mesh is populated once through the registration methods (or the
//! functions in [`builder`](super::builder)) and afterwards only read. All
//! iteration is by increasing handle, which equals creation order.

use nalgebra::{Point3, Vector3};

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::algo::convert::convert_to_mesh;
use crate::algo::unique_edges::{unique_edges, UniqueEdgeOptions};
use crate::error::{Link, MeshError, Result};
use crate::render::IndexedMeshBuilder;

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// The vertex normal, if one has been assigned.
    pub normal: Option<Vector3<f64>>,

    /// One half-edge starting at this vertex.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new vertex at the given position with no normal.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
            halfedge: HalfEdgeId::invalid(),
        }
    }

    /// Create a new vertex with a normal.
    pub fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            normal: Some(normal),
            ..Self::new(position)
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A directed half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge points to.
    pub vertex: VertexId<I>,

    /// The face this half-edge belongs to.
    pub face: FaceId<I>,

    /// The next half-edge around the face.
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    /// Redundant with `next`, stored for O(1) access.
    pub prev: HalfEdgeId<I>,

    /// The opposite half-edge of the neighbouring face.
    /// Invalid on a mesh boundary.
    pub twin: HalfEdgeId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new unlinked half-edge.
    pub fn new() -> Self {
        Self {
            vertex: VertexId::invalid(),
            face: FaceId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            twin: HalfEdgeId::invalid(),
        }
    }

    /// Create a new unlinked half-edge pointing to `vertex`.
    pub fn towards(vertex: VertexId<I>) -> Self {
        Self {
            vertex,
            ..Self::new()
        }
    }

    /// Check if this half-edge lies on the mesh boundary (has no twin).
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.twin.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

impl<I: MeshIndex> Default for Face<I> {
    fn default() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge mesh data structure for triangle meshes.
///
/// The mesh owns every vertex, half-edge and face; handles are plain indices
/// into its arenas and never outlive it in any meaningful sense.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity for a triangle mesh.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_faces * 3),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of half-edges without a twin.
    pub fn num_boundary_halfedges(&self) -> usize {
        self.halfedges.iter().filter(|he| he.is_boundary()).count()
    }

    /// Check whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.halfedges.is_empty() && self.faces.is_empty()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a mutable half-edge by ID.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    /// Get the normal of a vertex, if assigned.
    #[inline]
    pub fn normal(&self, v: VertexId<I>) -> Option<&Vector3<f64>> {
        self.vertex(v).normal.as_ref()
    }

    /// Assign the normal of a vertex.
    #[inline]
    pub fn set_normal(&mut self, v: VertexId<I>, normal: Vector3<f64>) {
        self.vertex_mut(v).normal = Some(normal);
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge. Invalid on a boundary.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).vertex
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    // ==================== Checked Navigation ====================
    //
    // The algorithms walk the graph through these so that a broken link is
    // reported as an error instead of an out-of-bounds panic.

    /// Get a vertex, failing if the handle is absent or dangling.
    pub fn try_vertex(&self, id: VertexId<I>) -> Result<&Vertex<I>> {
        id.valid()
            .and_then(|id| self.vertices.get(id.index()))
            .ok_or_else(|| MeshError::malformed(format!("dangling vertex handle {:?}", id)))
    }

    /// Get a half-edge, failing if the handle is absent or dangling.
    pub fn try_halfedge(&self, id: HalfEdgeId<I>) -> Result<&HalfEdge<I>> {
        id.valid()
            .and_then(|id| self.halfedges.get(id.index()))
            .ok_or_else(|| MeshError::malformed(format!("dangling half-edge handle {:?}", id)))
    }

    /// Get a face, failing if the handle is absent or dangling.
    pub fn try_face(&self, id: FaceId<I>) -> Result<&Face<I>> {
        id.valid()
            .and_then(|id| self.faces.get(id.index()))
            .ok_or_else(|| MeshError::malformed(format!("dangling face handle {:?}", id)))
    }

    /// Get the next half-edge around the face, failing if it is missing.
    pub fn try_next(&self, he: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        self.try_link(he, Link::Next)
    }

    /// Get the previous half-edge around the face, failing if it is missing.
    pub fn try_prev(&self, he: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        self.try_link(he, Link::Prev)
    }

    fn try_link(&self, he: HalfEdgeId<I>, link: Link) -> Result<HalfEdgeId<I>> {
        let edge = self.try_halfedge(he)?;
        let target = match link {
            Link::Next => edge.next,
            Link::Prev => edge.prev,
        };
        if !target.is_valid() {
            return Err(MeshError::MissingLink {
                halfedge: he.index(),
                link,
            });
        }
        self.try_halfedge(target)?;
        Ok(target)
    }

    /// Get the destination vertex of a half-edge, failing if it is missing.
    pub fn try_dest(&self, he: HalfEdgeId<I>) -> Result<VertexId<I>> {
        let v = self.try_halfedge(he)?.vertex;
        self.try_vertex(v)?;
        Ok(v)
    }

    /// Get the vertex a half-edge starts from.
    ///
    /// This is the destination of the previous half-edge in the face, so it
    /// requires a valid `prev` link.
    pub fn origin(&self, he: HalfEdgeId<I>) -> Result<VertexId<I>> {
        self.try_dest(self.try_prev(he)?)
    }

    /// Get the `(origin, destination)` vertices of a half-edge.
    pub fn edge_endpoints(&self, he: HalfEdgeId<I>) -> Result<(VertexId<I>, VertexId<I>)> {
        Ok((self.origin(he)?, self.try_dest(he)?))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over the IDs of all half-edges without a twin.
    pub fn boundary_halfedges(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedges()
            .filter(|(_, he)| he.is_boundary())
            .map(|(id, _)| id)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Iterate over half-edges around a face, following `next` links.
    ///
    /// Stops early at a missing or dangling link, and never yields more
    /// half-edges than the mesh holds, so a corrupt cycle cannot loop forever.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Get the three half-edges of a triangular face in winding order:
    /// `edge`, `next(edge)`, `next(next(edge))`.
    ///
    /// Fails if the face has no boundary half-edge, a `next` link is missing,
    /// or the cycle does not close after exactly three steps.
    pub fn face_triangle(&self, f: FaceId<I>) -> Result<[HalfEdgeId<I>; 3]> {
        let he0 = self.try_face(f)?.halfedge;
        if !he0.is_valid() {
            return Err(MeshError::MissingFaceEdge { face: f.index() });
        }
        self.try_halfedge(he0)?;

        let not_triangle = || MeshError::NonTriangularFace {
            face: f.index(),
            len: self.face_halfedges(f).count(),
        };

        let he1 = self.try_next(he0)?;
        if he1 == he0 {
            return Err(not_triangle());
        }
        let he2 = self.try_next(he1)?;
        if he2 == he0 || he2 == he1 {
            return Err(not_triangle());
        }
        if self.try_next(he2)? != he0 {
            return Err(not_triangle());
        }

        Ok([he0, he1, he2])
    }

    /// Get the three corner vertices of a triangular face in winding order.
    pub fn face_corners(&self, f: FaceId<I>) -> Result<[VertexId<I>; 3]> {
        let [he0, he1, he2] = self.face_triangle(f)?;
        Ok([self.try_dest(he0)?, self.try_dest(he1)?, self.try_dest(he2)?])
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        self.push_vertex(Vertex::new(position))
    }

    /// Add a new vertex with a normal and return its ID.
    pub fn add_vertex_with_normal(
        &mut self,
        position: Point3<f64>,
        normal: Vector3<f64>,
    ) -> VertexId<I> {
        self.push_vertex(Vertex::with_normal(position, normal))
    }

    /// Register a vertex and return its ID.
    pub fn push_vertex(&mut self, vertex: Vertex<I>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(vertex);
        id
    }

    /// Register a half-edge and return its ID.
    ///
    /// Links may be filled in later through [`halfedge_mut`](Self::halfedge_mut).
    pub fn add_halfedge(&mut self, halfedge: HalfEdge<I>) -> HalfEdgeId<I> {
        let id = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(halfedge);
        id
    }

    /// Register a face and return its ID.
    pub fn add_face(&mut self, face: Face<I>) -> FaceId<I> {
        let id = FaceId::new(self.faces.len());
        self.faces.push(face);
        id
    }

    // ==================== Algorithms ====================

    /// Get one representative half-edge per undirected edge.
    ///
    /// Shorthand for [`unique_edges`](crate::algo::unique_edges::unique_edges)
    /// with default options.
    pub fn unique_edges(&self) -> Result<Vec<HalfEdgeId<I>>> {
        unique_edges(self, &UniqueEdgeOptions::default())
    }

    /// Convert the triangles of this mesh into an indexed mesh named `name`.
    ///
    /// Shorthand for [`convert_to_mesh`](crate::algo::convert::convert_to_mesh).
    pub fn convert_to_mesh<B: IndexedMeshBuilder>(&self, name: &str, builder: B) -> Result<B::Output> {
        convert_to_mesh(self, name, builder)
    }

    // ==================== Validation ====================

    /// Check every structural invariant of the half-edge graph.
    ///
    /// - all stored handles are in range
    /// - `next`/`prev` are present and inverse to each other
    /// - twins are symmetric and antiparallel (by endpoint position)
    /// - every face is a closed three-cycle whose half-edges name that face
    /// - every half-edge appears in exactly one face cycle
    /// - a vertex's half-edge starts at that vertex
    pub fn validate(&self) -> Result<()> {
        for (heid, he) in self.halfedges() {
            self.try_vertex(he.vertex)?;
            self.try_face(he.face)?;

            let next = self.try_next(heid)?;
            let prev = self.try_prev(heid)?;
            if self.prev(next) != heid || self.next(prev) != heid {
                return Err(MeshError::malformed(format!(
                    "next/prev links of {:?} are not inverse",
                    heid
                )));
            }

            if he.twin.is_valid() {
                let twin = self.try_halfedge(he.twin)?;
                if twin.twin != heid {
                    return Err(MeshError::malformed(format!(
                        "twin of {:?} is {:?}, whose twin is {:?}",
                        heid, he.twin, twin.twin
                    )));
                }
                let (a, b) = self.edge_endpoints(heid)?;
                let (c, d) = self.edge_endpoints(he.twin)?;
                if self.position(a) != self.position(d) || self.position(b) != self.position(c) {
                    return Err(MeshError::malformed(format!(
                        "twins {:?} and {:?} are not antiparallel",
                        heid, he.twin
                    )));
                }
            }
        }

        let mut owner: Vec<Option<FaceId<I>>> = vec![None; self.halfedges.len()];
        for fid in self.face_ids() {
            for he in self.face_triangle(fid)? {
                if self.face_of(he) != fid {
                    return Err(MeshError::malformed(format!(
                        "{:?} lies on the cycle of {:?} but names {:?}",
                        he,
                        fid,
                        self.face_of(he)
                    )));
                }
                if let Some(other) = owner[he.index()].replace(fid) {
                    return Err(MeshError::malformed(format!(
                        "{:?} lies on the cycles of both {:?} and {:?}",
                        he, other, fid
                    )));
                }
            }
        }
        if let Some(i) = owner.iter().position(Option::is_none) {
            return Err(MeshError::malformed(format!(
                "{:?} is not part of any face cycle",
                HalfEdgeId::<I>::new(i)
            )));
        }

        for (vid, v) in self.vertices() {
            if v.halfedge.is_valid() && self.origin(v.halfedge)? != vid {
                return Err(MeshError::malformed(format!(
                    "outgoing half-edge {:?} of {:?} starts elsewhere",
                    v.halfedge, vid
                )));
            }
        }

        Ok(())
    }

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh
            .faces
            .get(f.index())
            .map(|face| face.halfedge)
            .unwrap_or_default();
        Self {
            mesh,
            start,
            current: start,
            remaining: mesh.halfedges.len(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.current.is_valid() {
            return None;
        }
        let he = self.mesh.halfedges.get(self.current.index())?;

        let result = self.current;
        self.remaining -= 1;
        self.current = he.next;
        if self.current == self.start {
            self.remaining = 0;
        }

        Some(result)
    }
}
