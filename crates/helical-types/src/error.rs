//! Error types for the Helical CCD core.
//!
//! All crates return `HelicalResult<T>` from fallible operations.
//! A narrow phase that finds no impact is a normal success with an
//! empty impact set, never an error.

use thiserror::Error;

/// Unified error type for the Helical CCD core.
#[derive(Debug, Error)]
pub enum HelicalError {
    /// An interval operation met an input outside its domain
    /// (e.g. division by an interval that straddles zero, or the
    /// square root of an entirely negative interval). Usually a
    /// geometric degeneracy the caller should treat as a non-impact
    /// or retry after perturbation.
    #[error("Interval domain error: {0}")]
    Domain(String),

    /// The requested dimension/feature combination has no containment
    /// predicate (e.g. edge-vertex impact in a 3D scene).
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A caller-supplied argument is out of range or inconsistent
    /// (negative search interval, non-positive tolerance, mismatched
    /// pose and body counts).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rigid body geometry is malformed or inconsistent.
    #[error("Invalid body: {0}")]
    InvalidBody(String),
}

/// Convenience alias for `Result<T, HelicalError>`.
pub type HelicalResult<T> = Result<T, HelicalError>;
