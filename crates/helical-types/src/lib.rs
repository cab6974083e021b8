//! # helical-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the Helical continuous collision detection core.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Helical crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{HelicalError, HelicalResult};
pub use ids::{BodyId, EdgeId, FaceId, VertexId};
