//! Narrow-phase time-of-impact computation.
//!
//! Per candidate, three closures are bound over the body poses: world
//! feature positions at an interval time (via pose interpolation), the
//! signed distance between the supporting primitives, and the
//! containment predicate on the finite features. The interval
//! root-finder drives them to a conservative TOI; the contact
//! parameters (`alpha`, barycentrics) are then evaluated at that time
//! in plain `f64`.
//!
//! The per-pair functions are the atomic contract: the detection
//! facade uses them internally, and outer solvers call them directly
//! for line searches.

use glam::DVec2;
use tracing::trace;

use helical_body::{Pose, RigidBody};
use helical_geometry::{
    are_edges_intersecting, is_point_along_segment, is_point_inside_triangle,
    line_line_signed_distance, point_line_signed_distance,
    point_plane_signed_distance_from_vertices,
};
use helical_math::{Interval, Vector, Vector2, Vector3};
use helical_types::{HelicalError, HelicalResult};

use crate::options::CcdOptions;
use crate::root_finder::interval_root_finder;

/// Result of an edge-vertex TOI query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVertexToi {
    /// Conservative time of impact.
    pub toi: f64,
    /// Contact position along the edge.
    pub alpha: f64,
}

/// Result of an edge-edge TOI query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEdgeToi {
    /// Conservative time of impact.
    pub toi: f64,
    /// Contact position along the first edge.
    pub alpha_a: f64,
    /// Contact position along the second edge.
    pub alpha_b: f64,
}

/// Result of a face-vertex TOI query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceVertexToi {
    /// Conservative time of impact.
    pub toi: f64,
    /// Barycentric coordinate toward the second face vertex.
    pub u: f64,
    /// Barycentric coordinate toward the third face vertex.
    pub v: f64,
}

/// Dimension dispatch for the narrow phase. Implemented for
/// [`RigidBody<2>`] (edge-vertex) and [`RigidBody<3>`] (edge-edge and
/// face-vertex); the remaining combinations surface
/// [`HelicalError::NotImplemented`].
#[allow(clippy::too_many_arguments)]
pub trait NarrowPhaseDispatch<const D: usize>: Sized {
    /// TOI between a vertex of one body and an edge of another.
    fn edge_vertex_toi(
        vertex_body: &Self,
        vertex_pose_t0: &Pose<f64, D>,
        vertex_pose_t1: &Pose<f64, D>,
        vertex_id: usize,
        edge_body: &Self,
        edge_pose_t0: &Pose<f64, D>,
        edge_pose_t1: &Pose<f64, D>,
        edge_id: usize,
        options: &CcdOptions,
    ) -> HelicalResult<Option<EdgeVertexToi>>;

    /// TOI between edges of two bodies.
    fn edge_edge_toi(
        body_a: &Self,
        pose_a_t0: &Pose<f64, D>,
        pose_a_t1: &Pose<f64, D>,
        edge_a_id: usize,
        body_b: &Self,
        pose_b_t0: &Pose<f64, D>,
        pose_b_t1: &Pose<f64, D>,
        edge_b_id: usize,
        options: &CcdOptions,
    ) -> HelicalResult<Option<EdgeEdgeToi>>;

    /// TOI between a vertex of one body and a face of another.
    fn face_vertex_toi(
        vertex_body: &Self,
        vertex_pose_t0: &Pose<f64, D>,
        vertex_pose_t1: &Pose<f64, D>,
        vertex_id: usize,
        face_body: &Self,
        face_pose_t0: &Pose<f64, D>,
        face_pose_t1: &Pose<f64, D>,
        face_id: usize,
        options: &CcdOptions,
    ) -> HelicalResult<Option<FaceVertexToi>>;
}

impl NarrowPhaseDispatch<2> for RigidBody<2> {
    fn edge_vertex_toi(
        vertex_body: &Self,
        vertex_pose_t0: &Pose<f64, 2>,
        vertex_pose_t1: &Pose<f64, 2>,
        vertex_id: usize,
        edge_body: &Self,
        edge_pose_t0: &Pose<f64, 2>,
        edge_pose_t1: &Pose<f64, 2>,
        edge_id: usize,
        options: &CcdOptions,
    ) -> HelicalResult<Option<EdgeVertexToi>> {
        compute_edge_vertex_toi(
            vertex_body,
            vertex_pose_t0,
            vertex_pose_t1,
            vertex_id,
            edge_body,
            edge_pose_t0,
            edge_pose_t1,
            edge_id,
            options,
        )
    }

    fn edge_edge_toi(
        _body_a: &Self,
        _pose_a_t0: &Pose<f64, 2>,
        _pose_a_t1: &Pose<f64, 2>,
        _edge_a_id: usize,
        _body_b: &Self,
        _pose_b_t0: &Pose<f64, 2>,
        _pose_b_t1: &Pose<f64, 2>,
        _edge_b_id: usize,
        _options: &CcdOptions,
    ) -> HelicalResult<Option<EdgeEdgeToi>> {
        Err(HelicalError::NotImplemented(
            "edge-edge TOI requires a 3D scene".into(),
        ))
    }

    fn face_vertex_toi(
        _vertex_body: &Self,
        _vertex_pose_t0: &Pose<f64, 2>,
        _vertex_pose_t1: &Pose<f64, 2>,
        _vertex_id: usize,
        _face_body: &Self,
        _face_pose_t0: &Pose<f64, 2>,
        _face_pose_t1: &Pose<f64, 2>,
        _face_id: usize,
        _options: &CcdOptions,
    ) -> HelicalResult<Option<FaceVertexToi>> {
        Err(HelicalError::NotImplemented(
            "face-vertex TOI requires a 3D scene".into(),
        ))
    }
}

impl NarrowPhaseDispatch<3> for RigidBody<3> {
    fn edge_vertex_toi(
        _vertex_body: &Self,
        _vertex_pose_t0: &Pose<f64, 3>,
        _vertex_pose_t1: &Pose<f64, 3>,
        _vertex_id: usize,
        _edge_body: &Self,
        _edge_pose_t0: &Pose<f64, 3>,
        _edge_pose_t1: &Pose<f64, 3>,
        _edge_id: usize,
        _options: &CcdOptions,
    ) -> HelicalResult<Option<EdgeVertexToi>> {
        Err(HelicalError::NotImplemented(
            "edge-vertex TOI requires a 2D scene".into(),
        ))
    }

    fn edge_edge_toi(
        body_a: &Self,
        pose_a_t0: &Pose<f64, 3>,
        pose_a_t1: &Pose<f64, 3>,
        edge_a_id: usize,
        body_b: &Self,
        pose_b_t0: &Pose<f64, 3>,
        pose_b_t1: &Pose<f64, 3>,
        edge_b_id: usize,
        options: &CcdOptions,
    ) -> HelicalResult<Option<EdgeEdgeToi>> {
        compute_edge_edge_toi(
            body_a, pose_a_t0, pose_a_t1, edge_a_id, body_b, pose_b_t0, pose_b_t1, edge_b_id,
            options,
        )
    }

    fn face_vertex_toi(
        vertex_body: &Self,
        vertex_pose_t0: &Pose<f64, 3>,
        vertex_pose_t1: &Pose<f64, 3>,
        vertex_id: usize,
        face_body: &Self,
        face_pose_t0: &Pose<f64, 3>,
        face_pose_t1: &Pose<f64, 3>,
        face_id: usize,
        options: &CcdOptions,
    ) -> HelicalResult<Option<FaceVertexToi>> {
        compute_face_vertex_toi(
            vertex_body,
            vertex_pose_t0,
            vertex_pose_t1,
            vertex_id,
            face_body,
            face_pose_t0,
            face_pose_t1,
            face_id,
            options,
        )
    }
}

/// TOI between a vertex of `vertex_body` and an edge of `edge_body` as
/// both move from their `t0` to their `t1` poses.
#[allow(clippy::too_many_arguments)]
pub fn compute_edge_vertex_toi(
    vertex_body: &RigidBody<2>,
    vertex_pose_t0: &Pose<f64, 2>,
    vertex_pose_t1: &Pose<f64, 2>,
    vertex_id: usize,
    edge_body: &RigidBody<2>,
    edge_pose_t0: &Pose<f64, 2>,
    edge_pose_t1: &Pose<f64, 2>,
    edge_id: usize,
    options: &CcdOptions,
) -> HelicalResult<Option<EdgeVertexToi>> {
    options.validate()?;
    check_feature(vertex_id, vertex_body.vertices.len(), "vertex")?;
    check_feature(edge_id, edge_body.edges.len(), "edge")?;

    let pa0 = vertex_pose_t0.cast::<Interval>();
    let pa1 = vertex_pose_t1.cast::<Interval>();
    let pb0 = edge_pose_t0.cast::<Interval>();
    let pb1 = edge_pose_t1.cast::<Interval>();
    let [e0, e1] = edge_body.edges[edge_id];

    let positions = |t: Interval| {
        let pa = Pose::interpolate(&pa0, &pa1, t);
        let pb = Pose::interpolate(&pb0, &pb1, t);
        (
            vertex_body.world_vertex(&pa, vertex_id),
            edge_body.world_vertex(&pb, e0 as usize),
            edge_body.world_vertex(&pb, e1 as usize),
        )
    };

    let toi_interval = interval_root_finder(
        |t| {
            let (v, a, b) = positions(t);
            point_line_signed_distance(v, a, b)
        },
        |t| {
            let (v, a, b) = positions(t);
            Ok(is_point_along_segment(v, a, b))
        },
        Interval::new(0.0, options.earliest_toi),
        options.toi_tolerance,
    )?;

    Ok(toi_interval.map(|ti| {
        let toi = ti.lo;
        let pa = Pose::interpolate(vertex_pose_t0, vertex_pose_t1, toi);
        let pb = Pose::interpolate(edge_pose_t0, edge_pose_t1, toi);
        let v = vertex_body.world_vertex(&pa, vertex_id);
        let a = edge_body.world_vertex(&pb, e0 as usize);
        let b = edge_body.world_vertex(&pb, e1 as usize);
        let alpha = segment_parameter(v, a, b);
        trace!(toi, alpha, "edge-vertex impact");
        EdgeVertexToi { toi, alpha }
    }))
}

/// TOI between an edge of `body_a` and an edge of `body_b`.
#[allow(clippy::too_many_arguments)]
pub fn compute_edge_edge_toi(
    body_a: &RigidBody<3>,
    pose_a_t0: &Pose<f64, 3>,
    pose_a_t1: &Pose<f64, 3>,
    edge_a_id: usize,
    body_b: &RigidBody<3>,
    pose_b_t0: &Pose<f64, 3>,
    pose_b_t1: &Pose<f64, 3>,
    edge_b_id: usize,
    options: &CcdOptions,
) -> HelicalResult<Option<EdgeEdgeToi>> {
    options.validate()?;
    check_feature(edge_a_id, body_a.edges.len(), "edge")?;
    check_feature(edge_b_id, body_b.edges.len(), "edge")?;

    let pa0 = pose_a_t0.cast::<Interval>();
    let pa1 = pose_a_t1.cast::<Interval>();
    let pb0 = pose_b_t0.cast::<Interval>();
    let pb1 = pose_b_t1.cast::<Interval>();
    let [a0, a1] = body_a.edges[edge_a_id];
    let [b0, b1] = body_b.edges[edge_b_id];

    let positions = |t: Interval| {
        let pa = Pose::interpolate(&pa0, &pa1, t);
        let pb = Pose::interpolate(&pb0, &pb1, t);
        (
            body_a.world_vertex(&pa, a0 as usize),
            body_a.world_vertex(&pa, a1 as usize),
            body_b.world_vertex(&pb, b0 as usize),
            body_b.world_vertex(&pb, b1 as usize),
        )
    };

    let toi_interval = interval_root_finder(
        |t| {
            let (ea0, ea1, eb0, eb1) = positions(t);
            line_line_signed_distance(ea0, ea1, eb0, eb1)
        },
        |t| {
            let (ea0, ea1, eb0, eb1) = positions(t);
            Ok(are_edges_intersecting(ea0, ea1, eb0, eb1))
        },
        Interval::new(0.0, options.earliest_toi),
        options.toi_tolerance,
    )?;

    Ok(toi_interval.map(|ti| {
        let toi = ti.lo;
        let pa = Pose::interpolate(pose_a_t0, pose_a_t1, toi);
        let pb = Pose::interpolate(pose_b_t0, pose_b_t1, toi);
        let ea0 = body_a.world_vertex(&pa, a0 as usize);
        let ea1 = body_a.world_vertex(&pa, a1 as usize);
        let eb0 = body_b.world_vertex(&pb, b0 as usize);
        let eb1 = body_b.world_vertex(&pb, b1 as usize);
        let (alpha_a, alpha_b) = segment_closest_parameters(ea0, ea1, eb0, eb1);
        trace!(toi, alpha_a, alpha_b, "edge-edge impact");
        EdgeEdgeToi {
            toi,
            alpha_a,
            alpha_b,
        }
    }))
}

/// TOI between a vertex of `vertex_body` and a face of `face_body`.
#[allow(clippy::too_many_arguments)]
pub fn compute_face_vertex_toi(
    vertex_body: &RigidBody<3>,
    vertex_pose_t0: &Pose<f64, 3>,
    vertex_pose_t1: &Pose<f64, 3>,
    vertex_id: usize,
    face_body: &RigidBody<3>,
    face_pose_t0: &Pose<f64, 3>,
    face_pose_t1: &Pose<f64, 3>,
    face_id: usize,
    options: &CcdOptions,
) -> HelicalResult<Option<FaceVertexToi>> {
    options.validate()?;
    check_feature(vertex_id, vertex_body.vertices.len(), "vertex")?;
    check_feature(face_id, face_body.faces.len(), "face")?;

    let pa0 = vertex_pose_t0.cast::<Interval>();
    let pa1 = vertex_pose_t1.cast::<Interval>();
    let pb0 = face_pose_t0.cast::<Interval>();
    let pb1 = face_pose_t1.cast::<Interval>();
    let [f0, f1, f2] = face_body.faces[face_id];

    let positions = |t: Interval| {
        let pa = Pose::interpolate(&pa0, &pa1, t);
        let pb = Pose::interpolate(&pb0, &pb1, t);
        (
            vertex_body.world_vertex(&pa, vertex_id),
            face_body.world_vertex(&pb, f0 as usize),
            face_body.world_vertex(&pb, f1 as usize),
            face_body.world_vertex(&pb, f2 as usize),
        )
    };

    let toi_interval = interval_root_finder(
        |t| {
            let (v, t0, t1, t2) = positions(t);
            point_plane_signed_distance_from_vertices(v, t0, t1, t2)
        },
        |t| {
            let (v, t0, t1, t2) = positions(t);
            Ok(is_point_inside_triangle(v, t0, t1, t2))
        },
        Interval::new(0.0, options.earliest_toi),
        options.toi_tolerance,
    )?;

    Ok(toi_interval.map(|ti| {
        let toi = ti.lo;
        let pa = Pose::interpolate(vertex_pose_t0, vertex_pose_t1, toi);
        let pb = Pose::interpolate(face_pose_t0, face_pose_t1, toi);
        let v = vertex_body.world_vertex(&pa, vertex_id);
        let t0 = face_body.world_vertex(&pb, f0 as usize);
        let t1 = face_body.world_vertex(&pb, f1 as usize);
        let t2 = face_body.world_vertex(&pb, f2 as usize);
        let (u, w) = barycentric_uv(v, t0, t1, t2);
        trace!(toi, u, v = w, "face-vertex impact");
        FaceVertexToi { toi, u, v: w }
    }))
}

/// TOI between a vertex and an edge whose endpoints all move along
/// straight displacement rays (no rigid pose attached). This is the
/// trajectory model of the fixed-displacement volume layer: position
/// at time `t` is `V + t·U`.
pub fn compute_edge_vertex_toi_linear(
    vi: DVec2,
    vj: DVec2,
    vk: DVec2,
    ui: DVec2,
    uj: DVec2,
    uk: DVec2,
    options: &CcdOptions,
) -> HelicalResult<Option<EdgeVertexToi>> {
    options.validate()?;

    let at = |v: DVec2, u: DVec2, t: Interval| -> Vector2<Interval> {
        Vector2::from_f64(v.into()) + Vector2::<Interval>::from_f64(u.into()).scale(t)
    };

    let toi_interval = interval_root_finder(
        |t| point_line_signed_distance(at(vk, uk, t), at(vi, ui, t), at(vj, uj, t)),
        |t| Ok(is_point_along_segment(at(vk, uk, t), at(vi, ui, t), at(vj, uj, t))),
        Interval::new(0.0, options.earliest_toi),
        options.toi_tolerance,
    )?;

    Ok(toi_interval.map(|ti| {
        let toi = ti.lo;
        let p = Vector2::from(vk + toi * uk);
        let a = Vector2::from(vi + toi * ui);
        let b = Vector2::from(vj + toi * uj);
        EdgeVertexToi {
            toi,
            alpha: segment_parameter(p, a, b),
        }
    }))
}

fn check_feature(id: usize, len: usize, kind: &str) -> HelicalResult<()> {
    if id >= len {
        return Err(HelicalError::InvalidInput(format!(
            "{kind} index {id} out of range ({len} available)"
        )));
    }
    Ok(())
}

/// Projection parameter of `p` onto the segment `a -> b`; degenerate
/// segments report their first endpoint.
fn segment_parameter<const D: usize>(
    p: Vector<f64, D>,
    a: Vector<f64, D>,
    b: Vector<f64, D>,
) -> f64 {
    let dir = b - a;
    let n = dir.norm_squared();
    if n <= f64::EPSILON {
        0.0
    } else {
        (p - a).dot(dir) / n
    }
}

/// Closest-point parameters between two segments, clamped to `[0, 1]`.
fn segment_closest_parameters(
    p0: Vector3<f64>,
    p1: Vector3<f64>,
    q0: Vector3<f64>,
    q1: Vector3<f64>,
) -> (f64, f64) {
    let d1 = p1 - p0;
    let d2 = q1 - q0;
    let r = p0 - q0;
    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(r);

    if a <= f64::EPSILON && e <= f64::EPSILON {
        return (0.0, 0.0);
    }
    if a <= f64::EPSILON {
        return (0.0, (f / e).clamp(0.0, 1.0));
    }
    let c = d1.dot(r);
    if e <= f64::EPSILON {
        return ((-c / a).clamp(0.0, 1.0), 0.0);
    }

    let b = d1.dot(d2);
    let denom = a * e - b * b;
    let mut s = if denom != 0.0 {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let t = (b * s + f) / e;
    if t < 0.0 {
        s = (-c / a).clamp(0.0, 1.0);
        return (s, 0.0);
    }
    if t > 1.0 {
        s = ((b - c) / a).clamp(0.0, 1.0);
        return (s, 1.0);
    }
    (s, t)
}

/// Barycentric `(u, v)` of `p` in the triangle `(a, b, c)`, with `u`
/// toward `b` and `v` toward `c`. Degenerate triangles report the
/// first vertex.
fn barycentric_uv(
    p: Vector3<f64>,
    a: Vector3<f64>,
    b: Vector3<f64>,
    c: Vector3<f64>,
) -> (f64, f64) {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d00 = ab.dot(ab);
    let d01 = ab.dot(ac);
    let d11 = ac.dot(ac);
    let d20 = ap.dot(ab);
    let d21 = ap.dot(ac);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() <= f64::EPSILON {
        return (0.0, 0.0);
    }
    let u = (d11 * d20 - d01 * d21) / denom;
    let v = (d00 * d21 - d01 * d20) / denom;
    (u, v)
}
