//! Small square matrices over any [`Scalar`].
//!
//! Only what rigid transforms need: identity, addition, scaling, and
//! matrix-vector / matrix-matrix products for `D` in {2, 3}.

use std::array;
use std::ops::{Add, Mul};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::scalar::Scalar;
use crate::vector::Vector;

/// A row-major `D x D` matrix with entries of scalar type `S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<S, const D: usize>(pub [[S; D]; D]);

// Rows travel as sequences, like `Vector`, because serde's array
// support does not cover const-generic lengths.
impl<S: Serialize, const D: usize> Serialize for Matrix<S, D> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let rows: Vec<&[S]> = self.0.iter().map(|row| row.as_slice()).collect();
        rows.serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>, const D: usize> Deserialize<'de> for Matrix<S, D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let nested = Vec::<Vec<S>>::deserialize(deserializer)?;
        let len = nested.len();
        let mut rows = Vec::with_capacity(D);
        for row in nested {
            let row_len = row.len();
            rows.push(row.try_into().map_err(|_| {
                De::Error::invalid_length(row_len, &"one entry per dimension")
            })?);
        }
        rows.try_into()
            .map(Matrix)
            .map_err(|_| De::Error::invalid_length(len, &"one row per dimension"))
    }
}

impl<S: Scalar, const D: usize> Matrix<S, D> {
    /// Builds a matrix from rows.
    #[inline]
    pub fn from_rows(rows: [[S; D]; D]) -> Self {
        Self(rows)
    }

    /// The identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self(array::from_fn(|i| {
            array::from_fn(|j| if i == j { S::one() } else { S::zero() })
        }))
    }

    /// Scales every entry.
    #[inline]
    pub fn scale(self, s: S) -> Self {
        Self(array::from_fn(|i| array::from_fn(|j| self.0[i][j] * s)))
    }

    /// Matrix-vector product.
    #[inline]
    pub fn mul_vec(self, v: Vector<S, D>) -> Vector<S, D> {
        Vector(array::from_fn(|i| {
            let mut acc = S::zero();
            for j in 0..D {
                acc = acc + self.0[i][j] * v.0[j];
            }
            acc
        }))
    }
}

impl<S: Scalar, const D: usize> Add for Matrix<S, D> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| {
            array::from_fn(|j| self.0[i][j] + rhs.0[i][j])
        }))
    }
}

impl<S: Scalar, const D: usize> Mul for Matrix<S, D> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| {
            array::from_fn(|j| {
                let mut acc = S::zero();
                for k in 0..D {
                    acc = acc + self.0[i][k] * rhs.0[k][j];
                }
                acc
            })
        }))
    }
}
