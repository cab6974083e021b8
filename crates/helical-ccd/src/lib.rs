//! # helical-ccd
//!
//! Conservative continuous collision detection for rigid bodies under
//! screw motion (linear translation plus linearly interpolated
//! axis-angle rotation).
//!
//! The pipeline has two phases:
//! 1. **Broad phase** — swept AABBs hashed into a uniform grid (or
//!    brute-forced) to produce typed candidate pairs
//! 2. **Narrow phase** — per candidate, an interval root-finder over
//!    interpolated interval poses yields a conservative time of impact
//!
//! Reported TOIs are lower bounds on the true first contact time,
//! within the configured tolerance: safe for collision avoidance even
//! when pessimistic. Detection is deterministic — identical inputs
//! yield identical impact lists.
//!
//! The crate is a pure synchronous library: a detection call runs to
//! completion on the caller's thread, borrows bodies and poses
//! read-only, and returns owned impact lists sorted by TOI.

pub mod broad_phase;
pub mod candidates;
pub mod hash_grid;
pub mod impacts;
pub mod narrow_phase;
pub mod options;
pub mod root_finder;
pub mod scene;
pub mod volume;

use tracing::debug;

use helical_body::{Pose, RigidBody, RotationMatrix};
use helical_math::Interval;
use helical_types::HelicalResult;

pub use broad_phase::{detect_collision_candidates, DetectionMethod};
pub use candidates::{
    Candidates, CollisionTypes, EdgeEdgeCandidate, EdgeVertexCandidate, FaceVertexCandidate,
};
pub use impacts::{
    convert_edge_vertex_to_edge_edge_impacts, prune_impacts, EdgeEdgeImpact, EdgeVertexImpact,
    FaceVertexImpact, Impacts, NO_IMPACT,
};
pub use narrow_phase::{
    compute_edge_edge_toi, compute_edge_vertex_toi, compute_edge_vertex_toi_linear,
    compute_face_vertex_toi, EdgeEdgeToi, EdgeVertexToi, FaceVertexToi, NarrowPhaseDispatch,
};
pub use options::CcdOptions;
pub use root_finder::interval_root_finder;
pub use scene::SceneIndex;
pub use volume::{compute_volumes_fixed_toi, space_time_collision_volume};

/// Finds all impacts in one time step with default options.
///
/// `poses_t0` and `poses_t1` are the per-body configurations at the
/// start and end of the step; `types` masks the collision categories
/// to consider and `method` selects the broad phase.
pub fn detect_collisions<const D: usize>(
    bodies: &[RigidBody<D>],
    poses_t0: &[Pose<f64, D>],
    poses_t1: &[Pose<f64, D>],
    types: CollisionTypes,
    method: DetectionMethod,
) -> HelicalResult<Impacts>
where
    RigidBody<D>: NarrowPhaseDispatch<D>,
    Pose<Interval, D>: RotationMatrix<Interval, D>,
{
    detect_collisions_with(
        bodies,
        poses_t0,
        poses_t1,
        types,
        method,
        &CcdOptions::default(),
    )
}

/// [`detect_collisions`] with explicit options.
pub fn detect_collisions_with<const D: usize>(
    bodies: &[RigidBody<D>],
    poses_t0: &[Pose<f64, D>],
    poses_t1: &[Pose<f64, D>],
    types: CollisionTypes,
    method: DetectionMethod,
    options: &CcdOptions,
) -> HelicalResult<Impacts>
where
    RigidBody<D>: NarrowPhaseDispatch<D>,
    Pose<Interval, D>: RotationMatrix<Interval, D>,
{
    let candidates =
        detect_collision_candidates(bodies, poses_t0, poses_t1, types, method, options)?;
    detect_collisions_from_candidates(bodies, poses_t0, poses_t1, &candidates, options)
}

/// Runs the narrow phase over an explicit candidate set.
///
/// Candidates are processed in their list order; the returned impact
/// lists are stably sorted by ascending TOI, so ties keep candidate
/// (lexicographic) order.
pub fn detect_collisions_from_candidates<const D: usize>(
    bodies: &[RigidBody<D>],
    poses_t0: &[Pose<f64, D>],
    poses_t1: &[Pose<f64, D>],
    candidates: &Candidates,
    options: &CcdOptions,
) -> HelicalResult<Impacts>
where
    RigidBody<D>: NarrowPhaseDispatch<D>,
    Pose<Interval, D>: RotationMatrix<Interval, D>,
{
    broad_phase::validate_scene(bodies, poses_t0, poses_t1)?;
    options.validate()?;

    let index = SceneIndex::new(bodies);
    let mut impacts = Impacts::default();

    for c in &candidates.ev {
        let (vb, vid) = index.resolve_vertex(c.vertex_id);
        let (eb, eid) = index.resolve_edge(c.edge_id);
        if let Some(t) = RigidBody::<D>::edge_vertex_toi(
            &bodies[vb],
            &poses_t0[vb],
            &poses_t1[vb],
            vid,
            &bodies[eb],
            &poses_t0[eb],
            &poses_t1[eb],
            eid,
            options,
        )? {
            impacts.ev.push(EdgeVertexImpact {
                edge_id: c.edge_id,
                vertex_id: c.vertex_id,
                time_of_impact: t.toi,
                alpha: t.alpha,
            });
        }
    }

    for c in &candidates.ee {
        let (ab, aid) = index.resolve_edge(c.edge_a_id);
        let (bb, bid) = index.resolve_edge(c.edge_b_id);
        if let Some(t) = RigidBody::<D>::edge_edge_toi(
            &bodies[ab],
            &poses_t0[ab],
            &poses_t1[ab],
            aid,
            &bodies[bb],
            &poses_t0[bb],
            &poses_t1[bb],
            bid,
            options,
        )? {
            impacts.ee.push(EdgeEdgeImpact {
                edge_a_id: c.edge_a_id,
                edge_b_id: c.edge_b_id,
                time_of_impact: t.toi,
                alpha_a: t.alpha_a,
                alpha_b: t.alpha_b,
            });
        }
    }

    for c in &candidates.fv {
        let (vb, vid) = index.resolve_vertex(c.vertex_id);
        let (fb, fid) = index.resolve_face(c.face_id);
        if let Some(t) = RigidBody::<D>::face_vertex_toi(
            &bodies[vb],
            &poses_t0[vb],
            &poses_t1[vb],
            vid,
            &bodies[fb],
            &poses_t0[fb],
            &poses_t1[fb],
            fid,
            options,
        )? {
            impacts.fv.push(FaceVertexImpact {
                face_id: c.face_id,
                vertex_id: c.vertex_id,
                time_of_impact: t.toi,
                u: t.u,
                v: t.v,
            });
        }
    }

    impacts.sort_by_toi();
    debug!(
        ev = impacts.ev.len(),
        ee = impacts.ee.len(),
        fv = impacts.fv.len(),
        "narrow phase impacts"
    );
    Ok(impacts)
}
