//! # helical-math
//!
//! Numeric foundations for the Helical CCD core.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec2`, `DVec3`, ...)
//!   as the canonical concrete math types
//! - [`Interval`] — closed real intervals with conservative
//!   (outward-rounded) arithmetic
//! - [`Scalar`] — the capability trait that lets geometric code run
//!   unchanged on `f64` and on `Interval`
//! - [`Ternary`] — three-valued logic for comparisons that may be
//!   undecidable on interval inputs
//! - Scalar-generic fixed-dimension vectors and matrices

pub mod interval;
pub mod matrix;
pub mod scalar;
pub mod ternary;
pub mod vector;

// Re-export glam types as the canonical concrete math types for Helical.
pub use glam::{DMat2, DMat3, DVec2, DVec3};

pub use interval::Interval;
pub use matrix::Matrix;
pub use scalar::Scalar;
pub use ternary::Ternary;
pub use vector::{Vector, Vector2, Vector3};
