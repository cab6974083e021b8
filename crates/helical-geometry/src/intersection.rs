//! Containment predicates.
//!
//! Signed distances locate times where features are *aligned*; these
//! predicates decide whether the aligned closest point actually lies
//! inside the finite feature extent. On interval inputs the answer may
//! be undecidable, so every predicate returns [`Ternary`]: the root
//! finder prunes on `False` and keeps refining on `True`/`Maybe`.

use helical_math::{Scalar, Ternary, Vector, Vector3};

/// Whether the projection of `p` onto the segment `a -> b` lies within
/// the segment. Quotient-free form of `0 <= alpha <= 1` where
/// `alpha = (p - a)·(b - a) / |b - a|²`.
#[inline]
pub fn is_point_along_segment<S: Scalar, const D: usize>(
    p: Vector<S, D>,
    a: Vector<S, D>,
    b: Vector<S, D>,
) -> Ternary {
    let dir = b - a;
    let t = (p - a).dot(dir);
    let n = dir.norm_squared();
    t.ge_zero().and((n - t).ge_zero())
}

/// Whether `p`, assumed on the triangle's plane, lies inside the
/// triangle `(a, b, c)`. Same-side triple-product tests against the
/// triangle normal; no barycentric division.
#[inline]
pub fn is_point_inside_triangle<S: Scalar>(
    p: Vector3<S>,
    a: Vector3<S>,
    b: Vector3<S>,
    c: Vector3<S>,
) -> Ternary {
    let n = (b - a).cross(c - a);
    let ab = (b - a).cross(p - a).dot(n).ge_zero();
    let bc = (c - b).cross(p - b).dot(n).ge_zero();
    let ca = (a - c).cross(p - c).dot(n).ge_zero();
    ab.and(bc).and(ca)
}

/// Whether the closest points of the supporting lines of `a0 -> a1`
/// and `b0 -> b1` fall inside both segments.
///
/// Uses the closest-point parameterization
/// `s = (b f - c e) / (a e - b²)`, `t = (b s + f) / e`
/// cleared of denominators; `a e - b²` and `e` are nonnegative by
/// Cauchy-Schwarz, so the sign tests below are the interval-safe form
/// of `0 <= s <= 1` and `0 <= t <= 1`. Parallel segments have no
/// unique closest-point pair and the cleared tests only accept the
/// degenerate `s_num = 0` configuration.
pub fn are_edges_intersecting<S: Scalar>(
    a0: Vector3<S>,
    a1: Vector3<S>,
    b0: Vector3<S>,
    b1: Vector3<S>,
) -> Ternary {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let r = a0 - b0;

    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let b = d1.dot(d2);
    let c = d1.dot(r);
    let f = d2.dot(r);

    let denom = a * e - b.sqr();

    let s_num = b * f - c * e;
    let s_inside = s_num.ge_zero().and((denom - s_num).ge_zero());

    let t_num = b * s_num + f * denom;
    let t_den = denom * e;
    let t_inside = t_num.ge_zero().and((t_den - t_num).ge_zero());

    s_inside.and(t_inside)
}
