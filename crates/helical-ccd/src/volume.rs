//! Space-time interference volumes at a fixed time of impact.
//!
//! The barrier/NCP layer measures how much space-time volume an edge
//! sweeps through the other feature after the impact:
//!
//! `V = (1 - τ) · sqrt(ε²·|e(τ)|² + (U·e(τ)⊥)²)`
//!
//! where `e(τ)` is the edge vector at the TOI, `U` the displacement of
//! the contact point along the edge, and `ε` the caller's
//! regularization. The formula is purely algebraic and generic over
//! [`Scalar`] so the outer layer can differentiate through it.

use glam::DVec2;

use helical_math::{Scalar, Vector2};

use crate::impacts::{EdgeEdgeImpact, NO_IMPACT};

/// Interference volume of the edge `(vi, vj)` with endpoint
/// displacements `(ui, uj)`, impacted at time `toi` and edge parameter
/// `alpha`.
pub fn space_time_collision_volume<S: Scalar>(
    vi: Vector2<S>,
    vj: Vector2<S>,
    ui: Vector2<S>,
    uj: Vector2<S>,
    toi: S,
    alpha: S,
    epsilon: S,
) -> S {
    let e = (vj + uj.scale(toi)) - (vi + ui.scale(toi));
    let e_perp = e.perp();
    let u = ui + (uj - ui).scale(alpha);
    (S::one() - toi) * (epsilon.sqr() * e.norm_squared() + u.dot(e_perp).sqr()).sqrt()
}

/// One interference volume per edge at its assigned impact.
///
/// `vertices` and `displacements` are scene-global; `edge_impact_map`
/// comes from [`prune_impacts`](crate::impacts::prune_impacts). Edges
/// without an impact get volume zero. The edge's own contact parameter
/// is `alpha_a` when it is the impact's first edge, `alpha_b`
/// otherwise.
pub fn compute_volumes_fixed_toi(
    vertices: &[DVec2],
    displacements: &[DVec2],
    edges: &[[u32; 2]],
    ee_impacts: &[EdgeEdgeImpact],
    edge_impact_map: &[i32],
    epsilon: f64,
) -> Vec<f64> {
    edges
        .iter()
        .enumerate()
        .map(|(eid, e)| {
            let slot = edge_impact_map[eid];
            if slot == NO_IMPACT {
                return 0.0;
            }
            let impact = &ee_impacts[slot as usize];
            let alpha = if impact.edge_a_id.index() == eid {
                impact.alpha_a
            } else {
                impact.alpha_b
            };
            let vi = Vector2::from(vertices[e[0] as usize]);
            let vj = Vector2::from(vertices[e[1] as usize]);
            let ui = Vector2::from(displacements[e[0] as usize]);
            let uj = Vector2::from(displacements[e[1] as usize]);
            space_time_collision_volume(vi, vj, ui, uj, impact.time_of_impact, alpha, epsilon)
        })
        .collect()
}
