//! Unique undirected-edge extraction.
//!
//! Interior edges of a half-edge mesh are stored twice, once per direction.
//! [`unique_edges`] collapses each undirected edge to a single representative
//! half-edge.
//!
//! Two half-edges describe the same undirected edge when their endpoint
//! positions are equal as an unordered pair. Identity of the vertex entities
//! does not matter: a flat-shaded mesh with one vertex per face corner still
//! yields one representative per geometric edge.
//!
//! Half-edges are visited by increasing handle and the first one seen for an
//! edge wins, so the representative is always the lowest handle of its edge
//! and the result is sorted by handle. Both strategies return the same
//! sequence. Positions are assumed free of NaN.

use std::collections::HashSet;

use log::debug;
use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::key::{point_key, Vec3Key};
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// How duplicate edges are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniqueEdgeStrategy {
    /// Compare every half-edge against all representatives found so far.
    /// Quadratic; kept as the reference implementation.
    PairwiseScan,
    /// Index representatives by their endpoint pair in a hash set.
    #[default]
    Hashed,
}

/// Options for [`unique_edges`].
#[derive(Debug, Clone, Default)]
pub struct UniqueEdgeOptions {
    /// Duplicate detection strategy.
    pub strategy: UniqueEdgeStrategy,
}

impl UniqueEdgeOptions {
    /// Options using the quadratic pairwise scan.
    pub fn pairwise() -> Self {
        Self::default().with_strategy(UniqueEdgeStrategy::PairwiseScan)
    }

    /// Set the duplicate detection strategy.
    pub fn with_strategy(mut self, strategy: UniqueEdgeStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Returns one representative half-edge per undirected edge.
///
/// For a closed manifold mesh this is exactly half of all half-edges; edges
/// on an open border contribute their single half-edge.
///
/// # Errors
///
/// The face cycles are checked before anything is collected. Every face must
/// close after exactly three `next` steps, and every half-edge needs an owning
/// face, a `prev` link that `next` inverts, and a destination vertex. Any
/// violation fails the whole extraction.
///
/// # Example
///
/// ```
/// use hemesh::prelude::*;
/// use hemesh::algo::unique_edges::{unique_edges, UniqueEdgeOptions};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2], [0, 2, 3]];
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
///
/// // 6 half-edges, the diagonal is shared
/// let edges = unique_edges(&mesh, &UniqueEdgeOptions::default()).unwrap();
/// assert_eq!(edges.len(), 5);
/// ```
pub fn unique_edges<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    options: &UniqueEdgeOptions,
) -> Result<Vec<HalfEdgeId<I>>> {
    check_face_cycles(mesh)?;

    let edges = match options.strategy {
        UniqueEdgeStrategy::PairwiseScan => pairwise_scan(mesh)?,
        UniqueEdgeStrategy::Hashed => hashed(mesh)?,
    };

    debug!(
        "unique edges ({:?}): {} of {} half-edges",
        options.strategy,
        edges.len(),
        mesh.num_halfedges()
    );
    Ok(edges)
}

fn check_face_cycles<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<()> {
    for f in mesh.face_ids() {
        mesh.face_triangle(f)?;
    }

    for (id, he) in mesh.halfedges() {
        mesh.try_face(he.face)?;
        let prev = mesh.try_prev(id)?;
        if mesh.try_next(prev)? != id {
            return Err(MeshError::malformed(format!(
                "next/prev links of {:?} are not inverse",
                id
            )));
        }
    }
    Ok(())
}

/// Positions of `(dest(he), dest(prev(he)))`.
fn endpoints<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    he: HalfEdgeId<I>,
) -> Result<(Point3<f64>, Point3<f64>)> {
    let (origin, dest) = mesh.edge_endpoints(he)?;
    Ok((*mesh.position(dest), *mesh.position(origin)))
}

fn pairwise_scan<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<Vec<HalfEdgeId<I>>> {
    let mut unique: Vec<(HalfEdgeId<I>, Point3<f64>, Point3<f64>)> = Vec::new();

    for he in mesh.halfedge_ids() {
        let (p1, p2) = endpoints(mesh, he)?;
        let seen = unique
            .iter()
            .any(|(_, q1, q2)| (p1 == *q1 && p2 == *q2) || (p1 == *q2 && p2 == *q1));
        if !seen {
            unique.push((he, p1, p2));
        }
    }

    Ok(unique.into_iter().map(|(he, _, _)| he).collect())
}

fn hashed<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<Vec<HalfEdgeId<I>>> {
    let mut seen: HashSet<(Vec3Key, Vec3Key)> = HashSet::with_capacity(mesh.num_halfedges() / 2 + 1);
    let mut unique = Vec::with_capacity(mesh.num_halfedges() / 2 + 1);

    for he in mesh.halfedge_ids() {
        let (p1, p2) = endpoints(mesh, he)?;
        let (k1, k2) = (point_key(&p1), point_key(&p2));
        let key = if k1 <= k2 { (k1, k2) } else { (k2, k1) };
        if seen.insert(key) {
            unique.push(he);
        }
    }

    Ok(unique)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::error::Link;
    use crate::mesh::{build_flat_shaded, build_from_triangles, fixtures};
    use proptest::prelude::*;

    const STRATEGIES: [UniqueEdgeStrategy; 2] =
        [UniqueEdgeStrategy::PairwiseScan, UniqueEdgeStrategy::Hashed];

    fn extract(mesh: &HalfEdgeMesh<u32>, strategy: UniqueEdgeStrategy) -> Vec<HalfEdgeId<u32>> {
        unique_edges(mesh, &UniqueEdgeOptions::default().with_strategy(strategy)).unwrap()
    }

    #[test]
    fn test_cube_has_18_edges() {
        fixtures::init_logging();
        for mesh in [fixtures::cube(), fixtures::flat_cube()] {
            assert_eq!(mesh.num_halfedges(), 36);
            for strategy in STRATEGIES {
                assert_eq!(extract(&mesh, strategy).len(), 18);
            }
        }
    }

    #[test]
    fn test_closed_mesh_halves_halfedges() {
        let mesh = fixtures::tetrahedron();
        assert_eq!(mesh.unique_edges().unwrap().len(), mesh.num_halfedges() / 2);
    }

    #[test]
    fn test_single_triangle_keeps_all() {
        let mesh = fixtures::single_triangle();
        for strategy in STRATEGIES {
            let edges = extract(&mesh, strategy);
            assert_eq!(edges, mesh.halfedge_ids().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_open_grid_count() {
        // Manifold with boundary: (H + B) / 2 edges
        let (vertices, faces) = fixtures::grid_input(3, 2);
        let mesh: HalfEdgeMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();
        let h = mesh.num_halfedges();
        let b = mesh.num_boundary_halfedges();
        assert_eq!(mesh.unique_edges().unwrap().len(), (h + b) / 2);
    }

    #[test]
    fn test_never_returns_twins() {
        let mesh = fixtures::flat_cube();
        for strategy in STRATEGIES {
            let edges: BTreeSet<_> = extract(&mesh, strategy).into_iter().collect();
            for &he in &edges {
                assert!(!edges.contains(&mesh.twin(he)));
            }
        }
    }

    #[test]
    fn test_lowest_handle_is_representative() {
        let mesh = fixtures::cube();
        let edges = mesh.unique_edges().unwrap();
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
        for he in edges {
            assert!(he < mesh.twin(he));
        }
    }

    #[test]
    fn test_idempotent() {
        let mesh = fixtures::flat_cube();
        assert_eq!(mesh.unique_edges().unwrap(), mesh.unique_edges().unwrap());
    }

    #[test]
    fn test_equal_positions_collapse_without_twins() {
        // Two triangles sharing an edge geometrically but built as separate
        // pieces, so no twin links exist between them.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [3, 4, 5]];
        let mesh: HalfEdgeMesh<u32> = build_flat_shaded(&vertices, &faces).unwrap();
        assert_eq!(mesh.num_boundary_halfedges(), 6);

        for strategy in STRATEGIES {
            assert_eq!(extract(&mesh, strategy).len(), 5);
        }
    }

    #[test]
    fn test_missing_prev_fails() {
        let mut mesh = fixtures::cube();
        mesh.halfedge_mut(HalfEdgeId::new(5)).prev = HalfEdgeId::invalid();

        for strategy in STRATEGIES {
            let err = unique_edges(&mesh, &UniqueEdgeOptions::default().with_strategy(strategy))
                .unwrap_err();
            assert!(matches!(
                err,
                MeshError::MissingLink {
                    halfedge: 5,
                    link: Link::Prev
                }
            ));
        }
    }

    #[test]
    fn test_quad_face_fails() {
        let mesh = fixtures::registered_quad();
        for strategy in STRATEGIES {
            let err = unique_edges(&mesh, &UniqueEdgeOptions::default().with_strategy(strategy))
                .unwrap_err();
            assert!(matches!(err, MeshError::NonTriangularFace { face: 0, len: 4 }));
        }
    }

    #[test]
    fn test_prev_not_inverse_of_next_fails() {
        let mut mesh = fixtures::cube();
        mesh.halfedge_mut(HalfEdgeId::new(0)).prev = HalfEdgeId::new(0);
        assert!(!mesh.is_valid());

        for strategy in STRATEGIES {
            let err = unique_edges(&mesh, &UniqueEdgeOptions::default().with_strategy(strategy))
                .unwrap_err();
            assert!(matches!(err, MeshError::MalformedTopology(_)));
        }
    }

    #[test]
    fn test_halfedge_without_face_fails() {
        let mut mesh = fixtures::registered_triangle();
        mesh.halfedge_mut(HalfEdgeId::new(2)).face = crate::mesh::FaceId::invalid();
        assert!(matches!(
            mesh.unique_edges(),
            Err(MeshError::MalformedTopology(_))
        ));
    }

    #[test]
    fn test_dangling_vertex_fails() {
        let mut mesh = fixtures::registered_triangle();
        mesh.halfedge_mut(HalfEdgeId::new(0)).vertex = crate::mesh::VertexId::new(17);
        assert!(matches!(
            mesh.unique_edges(),
            Err(MeshError::MalformedTopology(_))
        ));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert!(mesh.unique_edges().unwrap().is_empty());
    }

    fn distinct_position_pairs(mesh: &HalfEdgeMesh<u32>) -> usize {
        let mut pairs = BTreeSet::new();
        for he in mesh.halfedge_ids() {
            let (a, b) = endpoints(mesh, he).unwrap();
            let (ka, kb) = (point_key(&a), point_key(&b));
            pairs.insert(if ka <= kb { (ka, kb) } else { (kb, ka) });
        }
        pairs.len()
    }

    proptest! {
        #[test]
        fn prop_strategies_agree_on_grids(
            (n, m, mask) in (1usize..5, 1usize..5).prop_flat_map(|(n, m)| {
                (Just(n), Just(m), proptest::collection::vec(any::<bool>(), 2 * n * m))
            })
        ) {
            let (vertices, faces) = fixtures::grid_input(n, m);
            let faces: Vec<[usize; 3]> = faces
                .into_iter()
                .zip(&mask)
                .filter(|(_, &keep)| keep)
                .map(|(f, _)| f)
                .collect();
            prop_assume!(!faces.is_empty());

            let mesh: HalfEdgeMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();
            let pairwise = extract(&mesh, UniqueEdgeStrategy::PairwiseScan);
            let hashed = extract(&mesh, UniqueEdgeStrategy::Hashed);

            prop_assert_eq!(&pairwise, &hashed);
            prop_assert_eq!(
                hashed.len(),
                (mesh.num_halfedges() + mesh.num_boundary_halfedges()) / 2
            );
        }

        #[test]
        fn prop_strategies_agree_on_soups(
            triangles in proptest::collection::vec(
                proptest::array::uniform3((-2i8..3, -2i8..3, -2i8..3)),
                1..12,
            )
        ) {
            // Every triangle gets its own vertices, so coinciding positions
            // are the only thing tying edges together.
            let vertices: Vec<Point3<f64>> = triangles
                .iter()
                .flatten()
                .map(|&(x, y, z)| Point3::new(x as f64, y as f64, z as f64))
                .collect();
            let faces: Vec<[usize; 3]> = (0..triangles.len())
                .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
                .collect();

            let mesh: HalfEdgeMesh<u32> = build_flat_shaded(&vertices, &faces).unwrap();
            let pairwise = extract(&mesh, UniqueEdgeStrategy::PairwiseScan);
            let hashed = extract(&mesh, UniqueEdgeStrategy::Hashed);

            prop_assert_eq!(&pairwise, &hashed);
            prop_assert_eq!(hashed.len(), distinct_position_pairs(&mesh));
        }
    }
}
