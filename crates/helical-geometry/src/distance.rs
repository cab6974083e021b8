//! Signed distance functions used by the narrow-phase root finder.
//!
//! Each function is zero exactly when the features touch (collinear /
//! coplanar configurations) and is left unnormalized: the root finder
//! only cares about the zero set, and normalization would require the
//! division that interval scalars cannot always perform.

use helical_math::{Scalar, Vector2, Vector3};

/// Signed distance from `p` to the line through `a` and `b`,
/// scaled by `|b - a|`. Positive when `p` is to the left of `a -> b`.
#[inline]
pub fn point_line_signed_distance<S: Scalar>(p: Vector2<S>, a: Vector2<S>, b: Vector2<S>) -> S {
    (b - a).cross(p - a)
}

/// Signed distance between the lines through `a0 -> a1` and `b0 -> b1`,
/// scaled by `|(a1 - a0) x (b1 - b0)|`. Zero when the lines are
/// coplanar, which for skew segments is the crossing configuration.
#[inline]
pub fn line_line_signed_distance<S: Scalar>(
    a0: Vector3<S>,
    a1: Vector3<S>,
    b0: Vector3<S>,
    b1: Vector3<S>,
) -> S {
    (a1 - a0).cross(b1 - b0).dot(b0 - a0)
}

/// Signed distance from `p` to the plane through `a` with (possibly
/// unnormalized) normal `n`, scaled by `|n|`.
#[inline]
pub fn point_plane_signed_distance<S: Scalar>(
    p: Vector3<S>,
    a: Vector3<S>,
    n: Vector3<S>,
) -> S {
    n.dot(p - a)
}

/// Signed distance from `p` to the plane of the triangle
/// `(t0, t1, t2)`, scaled by twice the triangle area.
#[inline]
pub fn point_plane_signed_distance_from_vertices<S: Scalar>(
    p: Vector3<S>,
    t0: Vector3<S>,
    t1: Vector3<S>,
    t2: Vector3<S>,
) -> S {
    point_plane_signed_distance(p, t0, triangle_normal(t0, t1, t2))
}

/// Unnormalized left normal of the segment `a -> b`.
#[inline]
pub fn segment_normal<S: Scalar>(a: Vector2<S>, b: Vector2<S>) -> Vector2<S> {
    (b - a).perp()
}

/// Unnormalized normal of the triangle `(t0, t1, t2)`; its length is
/// twice the triangle area.
#[inline]
pub fn triangle_normal<S: Scalar>(t0: Vector3<S>, t1: Vector3<S>, t2: Vector3<S>) -> Vector3<S> {
    (t1 - t0).cross(t2 - t0)
}
