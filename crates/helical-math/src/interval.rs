//! Closed real intervals with conservative arithmetic.
//!
//! Every operation returns an interval guaranteed to enclose the exact
//! real result set of its operands. Endpoints are `f64`; after each
//! operation the result is widened outward by one ulp
//! (`next_down`/`next_up`), which makes each step individually
//! conservative under round-to-nearest without touching the FPU
//! rounding mode. Tightness affects only how many times the root-finder
//! subdivides, never soundness.
//!
//! Empty intervals are not representable; degenerate (`lo == hi`)
//! intervals are.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use helical_types::{HelicalError, HelicalResult};

/// Slack used when testing whether a trig extremum lies inside an
/// interval. Erring toward inclusion only widens the enclosure.
const EXTREMUM_SLACK: f64 = 1.0e-12;

/// Below this bound, `sinc`/`versc` switch to Taylor envelopes that
/// remain valid when the interval reaches zero.
const SMALL_ANGLE: f64 = 1.0e-3;

/// Beyond this magnitude the float spacing exceeds [`EXTREMUM_SLACK`]
/// and extremum localization is no longer trustworthy; trig falls back
/// to `[-1, 1]`.
const LARGE_ANGLE: f64 = 1.0e3;

/// A closed real interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub lo: f64,
    /// Upper bound.
    pub hi: f64,
}

#[inline]
fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Widen `[lo, hi]` outward by one ulp on each side.
#[inline]
fn widen(lo: f64, hi: f64) -> Interval {
    Interval {
        lo: lo.next_down(),
        hi: hi.next_up(),
    }
}

impl Interval {
    /// The degenerate interval `[0, 0]`.
    pub const ZERO: Self = Self { lo: 0.0, hi: 0.0 };

    /// The unit interval `[0, 1]`.
    pub const UNIT: Self = Self { lo: 0.0, hi: 1.0 };

    /// Creates `[lo, hi]`.
    #[inline]
    pub fn new(lo: f64, hi: f64) -> Self {
        debug_assert!(lo <= hi, "interval bounds out of order: [{lo}, {hi}]");
        Self { lo, hi }
    }

    /// Creates the degenerate interval `[v, v]`.
    #[inline]
    pub fn point(v: f64) -> Self {
        Self { lo: v, hi: v }
    }

    /// `hi - lo`.
    #[inline]
    pub fn width(self) -> f64 {
        self.hi - self.lo
    }

    /// Midpoint, clamped into the interval so bisection always makes a
    /// valid split.
    #[inline]
    pub fn midpoint(self) -> f64 {
        (self.lo + 0.5 * (self.hi - self.lo)).clamp(self.lo, self.hi)
    }

    /// Whether `x` lies in the interval (closed bounds).
    #[inline]
    pub fn contains(self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Whether `0` lies in the interval.
    #[inline]
    pub fn contains_zero(self) -> bool {
        self.lo <= 0.0 && 0.0 <= self.hi
    }

    /// Whether the two intervals share at least one point.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Smallest interval containing both operands.
    #[inline]
    pub fn hull(self, other: Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Intersection, where the caller knows the operands overlap.
    #[inline]
    fn clamp_to(self, other: Self) -> Self {
        Self {
            lo: self.lo.max(other.lo),
            hi: self.hi.min(other.hi),
        }
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.lo >= 0.0 {
            self
        } else if self.hi <= 0.0 {
            -self
        } else {
            Self {
                lo: 0.0,
                hi: self.hi.max(-self.lo),
            }
        }
    }

    /// Tight square: `[x², x²]` over the interval, never negative.
    #[inline]
    pub fn sqr(self) -> Self {
        let r = if self.lo >= 0.0 {
            widen(self.lo * self.lo, self.hi * self.hi)
        } else if self.hi <= 0.0 {
            widen(self.hi * self.hi, self.lo * self.lo)
        } else {
            let m = (self.lo * self.lo).max(self.hi * self.hi);
            widen(0.0, m)
        };
        Self {
            lo: r.lo.max(0.0),
            hi: r.hi,
        }
    }

    /// Quotient enclosure. Fails when the denominator straddles zero:
    /// the caller must split its domain instead.
    pub fn checked_div(self, rhs: Self) -> HelicalResult<Self> {
        if rhs.contains_zero() {
            return Err(HelicalError::Domain(format!(
                "division by an interval containing zero: [{}, {}]",
                rhs.lo, rhs.hi
            )));
        }
        let q = [
            self.lo / rhs.lo,
            self.lo / rhs.hi,
            self.hi / rhs.lo,
            self.hi / rhs.hi,
        ];
        let lo = q.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = q.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(widen(lo, hi))
    }

    /// Square root enclosure. An interval that dips below zero by
    /// rounding noise is clamped at zero; an entirely negative interval
    /// is a domain error.
    pub fn checked_sqrt(self) -> HelicalResult<Self> {
        if self.hi < 0.0 {
            return Err(HelicalError::Domain(format!(
                "square root of a negative interval: [{}, {}]",
                self.lo, self.hi
            )));
        }
        let lo = self.lo.max(0.0).sqrt().next_down().max(0.0);
        let hi = self.hi.sqrt().next_up();
        Ok(Self { lo, hi })
    }

    /// Sine enclosure.
    pub fn sin(self) -> Self {
        if !self.lo.is_finite()
            || !self.hi.is_finite()
            || self.width() >= TAU
            || self.lo.abs() > LARGE_ANGLE
            || self.hi.abs() > LARGE_ANGLE
        {
            return Self { lo: -1.0, hi: 1.0 };
        }
        let (lo, hi) = minmax(self.lo.sin(), self.hi.sin());
        // Two ulps absorb the libm evaluation error at the endpoints.
        let mut lo = lo.next_down().next_down();
        let mut hi = hi.next_up().next_up();

        // Interior maxima at pi/2 + 2k*pi, minima at -pi/2 + 2k*pi.
        let k0 = ((self.lo - FRAC_PI_2) / TAU).floor() as i64;
        for k in (k0 - 1)..=(k0 + 2) {
            let x = FRAC_PI_2 + (k as f64) * TAU;
            if x >= self.lo - EXTREMUM_SLACK && x <= self.hi + EXTREMUM_SLACK {
                hi = 1.0;
            }
        }
        let k0 = ((self.lo + FRAC_PI_2) / TAU).floor() as i64;
        for k in (k0 - 1)..=(k0 + 2) {
            let x = -FRAC_PI_2 + (k as f64) * TAU;
            if x >= self.lo - EXTREMUM_SLACK && x <= self.hi + EXTREMUM_SLACK {
                lo = -1.0;
            }
        }
        Self {
            lo: lo.max(-1.0),
            hi: hi.min(1.0),
        }
    }

    /// Cosine enclosure.
    pub fn cos(self) -> Self {
        if !self.lo.is_finite()
            || !self.hi.is_finite()
            || self.width() >= TAU
            || self.lo.abs() > LARGE_ANGLE
            || self.hi.abs() > LARGE_ANGLE
        {
            return Self { lo: -1.0, hi: 1.0 };
        }
        let (lo, hi) = minmax(self.lo.cos(), self.hi.cos());
        let mut lo = lo.next_down().next_down();
        let mut hi = hi.next_up().next_up();

        // Interior maxima at 2k*pi, minima at pi + 2k*pi.
        let k0 = (self.lo / TAU).floor() as i64;
        for k in (k0 - 1)..=(k0 + 2) {
            let x = (k as f64) * TAU;
            if x >= self.lo - EXTREMUM_SLACK && x <= self.hi + EXTREMUM_SLACK {
                hi = 1.0;
            }
        }
        let k0 = ((self.lo - PI) / TAU).floor() as i64;
        for k in (k0 - 1)..=(k0 + 2) {
            let x = PI + (k as f64) * TAU;
            if x >= self.lo - EXTREMUM_SLACK && x <= self.hi + EXTREMUM_SLACK {
                lo = -1.0;
            }
        }
        Self {
            lo: lo.max(-1.0),
            hi: hi.min(1.0),
        }
    }

    /// Four-quadrant arctangent enclosure of `self / x` with `self` as
    /// the ordinate. Falls back to the full `[-pi, pi]` when the input
    /// rectangle may touch the branch cut `{y = 0, x <= 0}`.
    pub fn atan2(self, x: Self) -> Self {
        if self.contains_zero() && x.lo <= 0.0 {
            return Self { lo: -PI, hi: PI };
        }
        let corners = [
            self.lo.atan2(x.lo),
            self.lo.atan2(x.hi),
            self.hi.atan2(x.lo),
            self.hi.atan2(x.hi),
        ];
        let lo = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let r = Self {
            lo: lo.next_down().next_down(),
            hi: hi.next_up().next_up(),
        };
        r.clamp_to(Self { lo: -PI, hi: PI })
    }

    /// Enclosure of `sin(x)/x` for `x >= 0`.
    ///
    /// Near zero the quotient is replaced by the envelope
    /// `1 - x²/6 <= sinc(x) <= 1`, which is valid for every real `x`,
    /// so the removable singularity never divides by zero.
    pub fn sinc(self) -> Self {
        debug_assert!(self.lo >= 0.0, "sinc expects a nonnegative angle interval");
        let bounds = Self { lo: -1.0, hi: 1.0 };
        if self.lo <= SMALL_ANGLE {
            let lo = (1.0 - self.hi * self.hi / 6.0).next_down().max(-1.0);
            return Self { lo, hi: 1.0 };
        }
        match self.sin().checked_div(self) {
            Ok(q) => q.clamp_to(bounds),
            Err(_) => bounds,
        }
    }

    /// Enclosure of `(1 - cos(x))/x²` for `x >= 0`.
    ///
    /// Near zero: `1/2 - x²/24 <= versc(x) <= 1/2`, valid for every
    /// real `x`.
    pub fn versc(self) -> Self {
        debug_assert!(self.lo >= 0.0, "versc expects a nonnegative angle interval");
        let bounds = Self { lo: 0.0, hi: 0.5 };
        if self.lo <= SMALL_ANGLE {
            let lo = (0.5 - self.hi * self.hi / 24.0).next_down().max(0.0);
            return Self { lo, hi: 0.5 };
        }
        let one = Self::point(1.0);
        match (one - self.cos()).checked_div(self.sqr()) {
            Ok(q) => q.clamp_to(bounds),
            Err(_) => bounds,
        }
    }
}

impl From<f64> for Interval {
    #[inline]
    fn from(v: f64) -> Self {
        Self::point(v)
    }
}

impl Add for Interval {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        widen(self.lo + rhs.lo, self.hi + rhs.hi)
    }
}

impl Sub for Interval {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        widen(self.lo - rhs.hi, self.hi - rhs.lo)
    }
}

impl Neg for Interval {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

impl Mul for Interval {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let p = [
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ];
        let lo = p.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = p.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        widen(lo, hi)
    }
}
