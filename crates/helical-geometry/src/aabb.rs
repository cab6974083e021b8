//! Axis-aligned bounding boxes for the broad phase.
//!
//! Boxes are plain `f64`: the interval machinery produces them (a swept
//! vertex AABB is just the interval enclosure of each world coordinate)
//! but overlap testing and hashing never need enclosure arithmetic.

use helical_math::{Interval, Vector};

/// An axis-aligned bounding box in `D` dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<const D: usize> {
    /// Minimum corner.
    pub min: [f64; D],
    /// Maximum corner.
    pub max: [f64; D],
}

impl<const D: usize> Aabb<D> {
    /// Creates a box from corners.
    #[inline]
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        debug_assert!((0..D).all(|i| min[i] <= max[i]), "AABB corners out of order");
        Self { min, max }
    }

    /// The box of a single point.
    #[inline]
    pub fn from_point(p: Vector<f64, D>) -> Self {
        Self { min: p.0, max: p.0 }
    }

    /// The enclosure of a vector of interval coordinates.
    #[inline]
    pub fn from_intervals(coords: Vector<Interval, D>) -> Self {
        Self {
            min: std::array::from_fn(|i| coords.0[i].lo),
            max: std::array::from_fn(|i| coords.0[i].hi),
        }
    }

    /// Smallest box containing both operands.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: std::array::from_fn(|i| self.min[i].min(other.min[i])),
            max: std::array::from_fn(|i| self.max[i].max(other.max[i])),
        }
    }

    /// Minkowski inflation by `radius` on every axis.
    #[inline]
    pub fn inflate(&self, radius: f64) -> Self {
        Self {
            min: std::array::from_fn(|i| self.min[i] - radius),
            max: std::array::from_fn(|i| self.max[i] + radius),
        }
    }

    /// Whether the boxes share at least one point (closed bounds).
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Length of the main diagonal.
    #[inline]
    pub fn diagonal_norm(&self) -> f64 {
        (0..D)
            .map(|i| {
                let e = self.max[i] - self.min[i];
                e * e
            })
            .sum::<f64>()
            .sqrt()
    }
}
