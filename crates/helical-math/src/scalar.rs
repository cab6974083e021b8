//! The scalar capability trait.
//!
//! Geometric primitives, poses, and world-vertex evaluation are written
//! once against [`Scalar`] and run unchanged on plain `f64` (fixed-TOI
//! and contact-parameter paths) and on [`Interval`] (root-finder
//! paths). There is no dynamic dispatch; each use is monomorphized.
//!
//! Division is deliberately not part of the contract: interval
//! quotients fail when the denominator straddles zero, so every
//! geometric predicate in the workspace is written quotient-free.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use crate::interval::Interval;
use crate::ternary::Ternary;

/// Capability trait for the scalar types geometric code runs on.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Embeds an exact `f64` value.
    fn from_f64(x: f64) -> Self;

    /// The additive identity.
    #[inline]
    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    /// The multiplicative identity.
    #[inline]
    fn one() -> Self {
        Self::from_f64(1.0)
    }

    /// Absolute value.
    fn abs(self) -> Self;

    /// Square. Tighter than `self * self` on intervals that straddle
    /// zero, and never negative.
    fn sqr(self) -> Self;

    /// Square root, clamped at zero. Call sites feed squared norms, so
    /// any negativity is rounding noise.
    fn sqrt(self) -> Self;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// `sin(x)/x` with the removable singularity at zero handled.
    /// Defined for nonnegative inputs (rotation angles).
    fn sinc(self) -> Self;

    /// `(1 - cos(x))/x²` with the removable singularity at zero
    /// handled. Defined for nonnegative inputs.
    fn versc(self) -> Self;

    /// Three-valued `self >= 0`.
    fn ge_zero(self) -> Ternary;

    /// Three-valued `self <= 0`.
    fn le_zero(self) -> Ternary;

    /// Whether zero is an admissible value of this scalar.
    fn contains_zero(self) -> bool;
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(x: f64) -> Self {
        x
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn sqr(self) -> Self {
        self * self
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self.max(0.0))
    }

    #[inline]
    fn sin(self) -> Self {
        f64::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        f64::cos(self)
    }

    #[inline]
    fn sinc(self) -> Self {
        if self.abs() < 1.0e-4 {
            1.0 - self * self / 6.0
        } else {
            f64::sin(self) / self
        }
    }

    #[inline]
    fn versc(self) -> Self {
        if self.abs() < 1.0e-4 {
            0.5 - self * self / 24.0
        } else {
            (1.0 - f64::cos(self)) / (self * self)
        }
    }

    #[inline]
    fn ge_zero(self) -> Ternary {
        (self >= 0.0).into()
    }

    #[inline]
    fn le_zero(self) -> Ternary {
        (self <= 0.0).into()
    }

    #[inline]
    fn contains_zero(self) -> bool {
        self == 0.0
    }
}

impl Scalar for Interval {
    #[inline]
    fn from_f64(x: f64) -> Self {
        Interval::point(x)
    }

    #[inline]
    fn abs(self) -> Self {
        Interval::abs(self)
    }

    #[inline]
    fn sqr(self) -> Self {
        Interval::sqr(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        // Squared-norm inputs are nonnegative up to rounding; the
        // entirely-negative case cannot arise from them.
        match Interval::checked_sqrt(self) {
            Ok(r) => r,
            Err(_) => Interval::ZERO,
        }
    }

    #[inline]
    fn sin(self) -> Self {
        Interval::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        Interval::cos(self)
    }

    #[inline]
    fn sinc(self) -> Self {
        Interval::sinc(self)
    }

    #[inline]
    fn versc(self) -> Self {
        Interval::versc(self)
    }

    #[inline]
    fn ge_zero(self) -> Ternary {
        if self.lo >= 0.0 {
            Ternary::True
        } else if self.hi < 0.0 {
            Ternary::False
        } else {
            Ternary::Maybe
        }
    }

    #[inline]
    fn le_zero(self) -> Ternary {
        if self.hi <= 0.0 {
            Ternary::True
        } else if self.lo > 0.0 {
            Ternary::False
        } else {
            Ternary::Maybe
        }
    }

    #[inline]
    fn contains_zero(self) -> bool {
        Interval::contains_zero(self)
    }
}
