//! # helical-body
//!
//! Rigid-body representation for the Helical CCD core.
//!
//! ## Key Types
//!
//! - [`Pose`] — rigid configuration (position + rotation parameters),
//!   scalar-generic so it interpolates over `f64` or intervals
//! - [`RotationMatrix`] — planar rotation in 2D, exponential map in 3D
//! - [`RigidBody`] — immutable body-space geometry with mass
//!   properties, state poses, and swept bounding boxes
//! - Procedural shape generators for tests and fixtures

pub mod body;
pub mod mass;
pub mod pose;
pub mod shapes;

pub use body::RigidBody;
pub use pose::{Pose, RotationMatrix};
