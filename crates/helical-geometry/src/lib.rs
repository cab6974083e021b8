//! # helical-geometry
//!
//! Geometric primitives for the Helical CCD core, polymorphic over
//! [`helical_math::Scalar`] so the same code serves double-precision
//! contact-parameter evaluation and interval-based root finding.
//!
//! ## Key operations
//!
//! - Signed distances: point-line (2D), line-line (3D), point-plane (3D)
//! - Containment predicates returning three-valued [`helical_math::Ternary`]
//! - Axis-aligned bounding boxes over `f64` for the broad phase
//!
//! All predicates are quotient-free; interval evaluation never divides.

pub mod aabb;
pub mod distance;
pub mod intersection;

pub use aabb::Aabb;
pub use distance::{
    line_line_signed_distance, point_line_signed_distance, point_plane_signed_distance,
    point_plane_signed_distance_from_vertices, segment_normal, triangle_normal,
};
pub use intersection::{are_edges_intersecting, is_point_along_segment, is_point_inside_triangle};
