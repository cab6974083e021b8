//! Fixed-dimension vectors over any [`Scalar`].
//!
//! `glam` covers the concrete `f64` cases but cannot carry interval
//! endpoints, so the scalar-generic paths use these types and convert
//! at the boundary.

use std::array;
use std::ops::{Add, Index, IndexMut, Neg, Sub};

use glam::{DVec2, DVec3};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::scalar::Scalar;

/// A `D`-dimensional vector with components of scalar type `S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<S, const D: usize>(pub [S; D]);

// serde's array support does not cover const-generic lengths, so
// vectors travel as plain sequences.
impl<S: Serialize, const D: usize> Serialize for Vector<S, D> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>, const D: usize> Deserialize<'de> for Vector<S, D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let components = Vec::<S>::deserialize(deserializer)?;
        let len = components.len();
        components
            .try_into()
            .map(Vector)
            .map_err(|_| De::Error::invalid_length(len, &"one component per dimension"))
    }
}

/// A 2D vector.
pub type Vector2<S> = Vector<S, 2>;
/// A 3D vector.
pub type Vector3<S> = Vector<S, 3>;

impl<S: Scalar, const D: usize> Vector<S, D> {
    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self([S::zero(); D])
    }

    /// Embeds an `f64` vector into the scalar type `S`.
    #[inline]
    pub fn from_f64(v: Vector<f64, D>) -> Self {
        Self(array::from_fn(|i| S::from_f64(v.0[i])))
    }

    /// Component-wise scaling.
    #[inline]
    pub fn scale(self, s: S) -> Self {
        Self(array::from_fn(|i| self.0[i] * s))
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> S {
        let mut acc = S::zero();
        for i in 0..D {
            acc = acc + self.0[i] * other.0[i];
        }
        acc
    }

    /// Squared Euclidean norm, via [`Scalar::sqr`] so squares keep
    /// their sign constraint on straddling intervals.
    #[inline]
    pub fn norm_squared(self) -> S {
        let mut acc = S::zero();
        for i in 0..D {
            acc = acc + self.0[i].sqr();
        }
        acc
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(self) -> S {
        self.norm_squared().sqrt()
    }
}

impl<S: Scalar> Vector<S, 2> {
    #[inline]
    pub fn new(x: S, y: S) -> Self {
        Self([x, y])
    }

    /// 2D cross product (signed parallelogram area).
    #[inline]
    pub fn cross(self, other: Self) -> S {
        self.0[0] * other.0[1] - self.0[1] * other.0[0]
    }

    /// Counter-clockwise perpendicular.
    #[inline]
    pub fn perp(self) -> Self {
        Self([-self.0[1], self.0[0]])
    }
}

impl<S: Scalar> Vector<S, 3> {
    #[inline]
    pub fn new(x: S, y: S, z: S) -> Self {
        Self([x, y, z])
    }

    /// 3D cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

impl<S: Scalar, const D: usize> Add for Vector<S, D> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<S: Scalar, const D: usize> Sub for Vector<S, D> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<S: Scalar, const D: usize> Neg for Vector<S, D> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(array::from_fn(|i| -self.0[i]))
    }
}

impl<S, const D: usize> Index<usize> for Vector<S, D> {
    type Output = S;
    #[inline]
    fn index(&self, i: usize) -> &S {
        &self.0[i]
    }
}

impl<S, const D: usize> IndexMut<usize> for Vector<S, D> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut S {
        &mut self.0[i]
    }
}

impl From<DVec2> for Vector<f64, 2> {
    #[inline]
    fn from(v: DVec2) -> Self {
        Self([v.x, v.y])
    }
}

impl From<Vector<f64, 2>> for DVec2 {
    #[inline]
    fn from(v: Vector<f64, 2>) -> Self {
        DVec2::new(v.0[0], v.0[1])
    }
}

impl From<DVec3> for Vector<f64, 3> {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self([v.x, v.y, v.z])
    }
}

impl From<Vector<f64, 3>> for DVec3 {
    #[inline]
    fn from(v: Vector<f64, 3>) -> Self {
        DVec3::new(v.0[0], v.0[1], v.0[2])
    }
}
