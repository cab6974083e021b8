//! Broad-phase candidate generation.
//!
//! Builds swept AABBs for every feature over the pose interval, then
//! produces typed candidate pairs either by brute force or through the
//! spatial hash grid. Both methods apply the same filters — distinct
//! bodies, distinct collision groups, actual AABB overlap, requested
//! collision types — so they agree on the candidate set up to
//! tightness of the grid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use helical_body::{Pose, RigidBody, RotationMatrix};
use helical_geometry::Aabb;
use helical_math::Interval;
use helical_types::{HelicalError, HelicalResult};

use crate::candidates::{
    Candidates, CollisionTypes, EdgeEdgeCandidate, EdgeVertexCandidate, FaceVertexCandidate,
};
use crate::hash_grid::HashGrid;
use crate::options::CcdOptions;

/// Broad-phase algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// Test every cross-body feature pair.
    BruteForce,
    /// Uniform spatial hashing of swept AABBs.
    HashGrid,
}

/// Swept AABBs of every scene feature, with owning body indices for
/// the cross-body filters.
struct SweptAabbs<const D: usize> {
    vertices: Vec<Aabb<D>>,
    vertex_body: Vec<u32>,
    edges: Vec<Aabb<D>>,
    edge_body: Vec<u32>,
    faces: Vec<Aabb<D>>,
    face_body: Vec<u32>,
}

impl<const D: usize> SweptAabbs<D> {
    fn build(
        bodies: &[RigidBody<D>],
        poses_t0: &[Pose<f64, D>],
        poses_t1: &[Pose<f64, D>],
        inflation: f64,
    ) -> Self
    where
        Pose<Interval, D>: RotationMatrix<Interval, D>,
    {
        let mut swept = Self {
            vertices: Vec::new(),
            vertex_body: Vec::new(),
            edges: Vec::new(),
            edge_body: Vec::new(),
            faces: Vec::new(),
            face_body: Vec::new(),
        };
        for (b, body) in bodies.iter().enumerate() {
            let (p0, p1) = (&poses_t0[b], &poses_t1[b]);
            for v in 0..body.vertices.len() {
                swept.vertices.push(body.swept_vertex_aabb(p0, p1, v, inflation));
                swept.vertex_body.push(b as u32);
            }
            for e in 0..body.edges.len() {
                swept.edges.push(body.swept_edge_aabb(p0, p1, e, inflation));
                swept.edge_body.push(b as u32);
            }
            for f in 0..body.faces.len() {
                swept.faces.push(body.swept_face_aabb(p0, p1, f, inflation));
                swept.face_body.push(b as u32);
            }
        }
        swept
    }

    /// Grid cell size: mean swept edge diagonal scaled by the
    /// configured factor, falling back to vertex diagonals for
    /// edgeless scenes.
    fn cell_size(&self, factor: f64) -> f64 {
        let mean = |boxes: &[Aabb<D>]| {
            boxes.iter().map(Aabb::diagonal_norm).sum::<f64>() / boxes.len().max(1) as f64
        };
        let base = if self.edges.is_empty() {
            mean(&self.vertices)
        } else {
            mean(&self.edges)
        };
        factor * base
    }
}

pub(crate) fn validate_scene<const D: usize>(
    bodies: &[RigidBody<D>],
    poses_t0: &[Pose<f64, D>],
    poses_t1: &[Pose<f64, D>],
) -> HelicalResult<()> {
    if poses_t0.len() != bodies.len() || poses_t1.len() != bodies.len() {
        return Err(HelicalError::InvalidInput(format!(
            "{} bodies but {} / {} poses",
            bodies.len(),
            poses_t0.len(),
            poses_t1.len()
        )));
    }
    Ok(())
}

/// Whether features of these two bodies may collide at all.
#[inline]
fn bodies_can_collide<const D: usize>(bodies: &[RigidBody<D>], a: u32, b: u32) -> bool {
    a != b && bodies[a as usize].group_id != bodies[b as usize].group_id
}

/// Runs the broad phase alone, producing candidate pairs per collision
/// category.
pub fn detect_collision_candidates<const D: usize>(
    bodies: &[RigidBody<D>],
    poses_t0: &[Pose<f64, D>],
    poses_t1: &[Pose<f64, D>],
    types: CollisionTypes,
    method: DetectionMethod,
    options: &CcdOptions,
) -> HelicalResult<Candidates>
where
    Pose<Interval, D>: RotationMatrix<Interval, D>,
{
    validate_scene(bodies, poses_t0, poses_t1)?;
    options.validate()?;

    // Feature AABBs are pushed in body order, so their positions are
    // already the scene-global ids of `SceneIndex`.
    let swept = SweptAabbs::build(bodies, poses_t0, poses_t1, options.inflation_radius);

    let mut candidates = match method {
        DetectionMethod::BruteForce => brute_force_candidates(bodies, &swept, types),
        DetectionMethod::HashGrid => hash_grid_candidates(bodies, &swept, types, options),
    };
    candidates.sort();

    debug!(
        method = ?method,
        ev = candidates.ev.len(),
        ee = candidates.ee.len(),
        fv = candidates.fv.len(),
        "broad phase candidates"
    );
    Ok(candidates)
}

fn brute_force_candidates<const D: usize>(
    bodies: &[RigidBody<D>],
    swept: &SweptAabbs<D>,
    types: CollisionTypes,
) -> Candidates {
    let mut out = Candidates::default();

    if types.contains(CollisionTypes::EDGE_VERTEX) {
        for (e, ea) in swept.edges.iter().enumerate() {
            for (v, va) in swept.vertices.iter().enumerate() {
                if bodies_can_collide(bodies, swept.edge_body[e], swept.vertex_body[v])
                    && ea.intersects(va)
                {
                    out.ev.push(EdgeVertexCandidate {
                        edge_id: helical_types::EdgeId(e as u32),
                        vertex_id: helical_types::VertexId(v as u32),
                    });
                }
            }
        }
    }
    if types.contains(CollisionTypes::EDGE_EDGE) {
        for (a, aa) in swept.edges.iter().enumerate() {
            for (b, ba) in swept.edges.iter().enumerate().skip(a + 1) {
                if bodies_can_collide(bodies, swept.edge_body[a], swept.edge_body[b])
                    && aa.intersects(ba)
                {
                    out.ee.push(EdgeEdgeCandidate {
                        edge_a_id: helical_types::EdgeId(a as u32),
                        edge_b_id: helical_types::EdgeId(b as u32),
                    });
                }
            }
        }
    }
    if types.contains(CollisionTypes::FACE_VERTEX) {
        for (f, fa) in swept.faces.iter().enumerate() {
            for (v, va) in swept.vertices.iter().enumerate() {
                if bodies_can_collide(bodies, swept.face_body[f], swept.vertex_body[v])
                    && fa.intersects(va)
                {
                    out.fv.push(FaceVertexCandidate {
                        face_id: helical_types::FaceId(f as u32),
                        vertex_id: helical_types::VertexId(v as u32),
                    });
                }
            }
        }
    }
    out
}

fn hash_grid_candidates<const D: usize>(
    bodies: &[RigidBody<D>],
    swept: &SweptAabbs<D>,
    types: CollisionTypes,
    options: &CcdOptions,
) -> Candidates {
    let cell_size = swept.cell_size(options.cell_size_factor);
    let mut grid = HashGrid::<D>::new(cell_size);

    let want_vertices =
        types.contains(CollisionTypes::EDGE_VERTEX) || types.contains(CollisionTypes::FACE_VERTEX);
    if want_vertices {
        for (v, aabb) in swept.vertices.iter().enumerate() {
            grid.insert_vertex(v as u32, aabb);
        }
    }
    if types.intersects(CollisionTypes::EDGE_VERTEX | CollisionTypes::EDGE_EDGE) {
        for (e, aabb) in swept.edges.iter().enumerate() {
            grid.insert_edge(e as u32, aabb);
        }
    }
    if types.contains(CollisionTypes::FACE_VERTEX) {
        for (f, aabb) in swept.faces.iter().enumerate() {
            grid.insert_face(f as u32, aabb);
        }
    }
    debug!(
        cell_size,
        cells = grid.occupied_cells(),
        "hash grid built"
    );

    let mut out = Candidates::default();
    if types.contains(CollisionTypes::EDGE_VERTEX) {
        for (e, v) in grid.edge_vertex_pairs() {
            // Co-occupancy can be a hash artifact; re-check the boxes.
            if bodies_can_collide(bodies, swept.edge_body[e as usize], swept.vertex_body[v as usize])
                && swept.edges[e as usize].intersects(&swept.vertices[v as usize])
            {
                out.ev.push(EdgeVertexCandidate {
                    edge_id: helical_types::EdgeId(e),
                    vertex_id: helical_types::VertexId(v),
                });
            }
        }
    }
    if types.contains(CollisionTypes::EDGE_EDGE) {
        for (a, b) in grid.edge_edge_pairs() {
            if bodies_can_collide(bodies, swept.edge_body[a as usize], swept.edge_body[b as usize])
                && swept.edges[a as usize].intersects(&swept.edges[b as usize])
            {
                out.ee.push(EdgeEdgeCandidate {
                    edge_a_id: helical_types::EdgeId(a),
                    edge_b_id: helical_types::EdgeId(b),
                });
            }
        }
    }
    if types.contains(CollisionTypes::FACE_VERTEX) {
        for (f, v) in grid.face_vertex_pairs() {
            if bodies_can_collide(bodies, swept.face_body[f as usize], swept.vertex_body[v as usize])
                && swept.faces[f as usize].intersects(&swept.vertices[v as usize])
            {
                out.fv.push(FaceVertexCandidate {
                    face_id: helical_types::FaceId(f),
                    vertex_id: helical_types::VertexId(v),
                });
            }
        }
    }
    out
}
