//! Broad-phase candidate records.
//!
//! Candidates carry the same identifier tuples as impacts but no
//! time-of-impact or contact parameters — those are the narrow phase's
//! to produce. All ids are scene-global.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use helical_types::{EdgeId, FaceId, VertexId};

bitflags! {
    /// Which collision categories a detection call should consider.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CollisionTypes: u8 {
        /// Edge-vertex (2D scenes).
        const EDGE_VERTEX = 1 << 0;
        /// Edge-edge (3D scenes).
        const EDGE_EDGE = 1 << 1;
        /// Face-vertex (3D scenes).
        const FACE_VERTEX = 1 << 2;
    }
}

/// A possible edge-vertex contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeVertexCandidate {
    /// The edge.
    pub edge_id: EdgeId,
    /// The vertex.
    pub vertex_id: VertexId,
}

/// A possible edge-edge contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeEdgeCandidate {
    /// The lower-indexed edge.
    pub edge_a_id: EdgeId,
    /// The higher-indexed edge.
    pub edge_b_id: EdgeId,
}

/// A possible face-vertex contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceVertexCandidate {
    /// The face.
    pub face_id: FaceId,
    /// The vertex.
    pub vertex_id: VertexId,
}

/// Candidate lists for one detection call, one per collision category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidates {
    /// Edge-vertex candidates.
    pub ev: Vec<EdgeVertexCandidate>,
    /// Edge-edge candidates.
    pub ee: Vec<EdgeEdgeCandidate>,
    /// Face-vertex candidates.
    pub fv: Vec<FaceVertexCandidate>,
}

impl Candidates {
    /// Total candidate count across categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.ev.len() + self.ee.len() + self.fv.len()
    }

    /// Whether no candidates were produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorts every list lexicographically so downstream iteration
    /// order is independent of hash-map traversal order.
    pub fn sort(&mut self) {
        self.ev.sort_unstable();
        self.ee.sort_unstable();
        self.fv.sort_unstable();
    }
}
