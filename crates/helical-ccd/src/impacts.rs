//! Impact records and impact aggregation.
//!
//! The narrow phase produces one record per confirmed contact. The
//! aggregation helpers expand edge-vertex impacts into edge-edge form
//! and prune to the earliest impact per edge — the shape the
//! barrier/NCP volume layer consumes.

use serde::{Deserialize, Serialize};

use helical_types::{EdgeId, FaceId, VertexId};

/// Sentinel in the edge impact map for edges with no impact.
pub const NO_IMPACT: i32 = -1;

/// Contact between an edge and a vertex (2D).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeVertexImpact {
    /// The impacted edge.
    pub edge_id: EdgeId,
    /// The impacting vertex.
    pub vertex_id: VertexId,
    /// Conservative time of impact in `[0, earliest_toi]`.
    pub time_of_impact: f64,
    /// Contact position along the edge: 0 at the first endpoint,
    /// 1 at the second.
    pub alpha: f64,
}

/// Contact between two edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeEdgeImpact {
    /// First edge.
    pub edge_a_id: EdgeId,
    /// Second edge.
    pub edge_b_id: EdgeId,
    /// Conservative time of impact.
    pub time_of_impact: f64,
    /// Contact position along the first edge.
    pub alpha_a: f64,
    /// Contact position along the second edge.
    pub alpha_b: f64,
}

/// Contact between a face and a vertex (3D).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceVertexImpact {
    /// The impacted face.
    pub face_id: FaceId,
    /// The impacting vertex.
    pub vertex_id: VertexId,
    /// Conservative time of impact.
    pub time_of_impact: f64,
    /// Barycentric coordinate of the contact toward the second face
    /// vertex.
    pub u: f64,
    /// Barycentric coordinate toward the third face vertex.
    pub v: f64,
}

/// Impact lists for one detection call, sorted ascending by TOI with
/// ties left in insertion order (candidates are iterated in sorted
/// order, so insertion order is itself lexicographic).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Impacts {
    /// Edge-vertex impacts.
    pub ev: Vec<EdgeVertexImpact>,
    /// Edge-edge impacts.
    pub ee: Vec<EdgeEdgeImpact>,
    /// Face-vertex impacts.
    pub fv: Vec<FaceVertexImpact>,
}

impl Impacts {
    /// Total impact count across categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.ev.len() + self.ee.len() + self.fv.len()
    }

    /// Whether no impacts were found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Earliest time of impact across all categories, if any.
    pub fn earliest_toi(&self) -> Option<f64> {
        let ev = self.ev.iter().map(|i| i.time_of_impact);
        let ee = self.ee.iter().map(|i| i.time_of_impact);
        let fv = self.fv.iter().map(|i| i.time_of_impact);
        ev.chain(ee).chain(fv).min_by(f64::total_cmp)
    }

    /// Stable sort of every list by ascending TOI.
    pub fn sort_by_toi(&mut self) {
        self.ev
            .sort_by(|a, b| a.time_of_impact.total_cmp(&b.time_of_impact));
        self.ee
            .sort_by(|a, b| a.time_of_impact.total_cmp(&b.time_of_impact));
        self.fv
            .sort_by(|a, b| a.time_of_impact.total_cmp(&b.time_of_impact));
    }
}

/// Expands each edge-vertex impact into edge-edge impacts, pairing the
/// impacted edge with every edge incident to the impacting vertex.
///
/// `edges` is the scene-global edge list. The impacting side's contact
/// parameter is 0 or 1, selecting the endpoint of the incident edge
/// that coincides with the vertex.
pub fn convert_edge_vertex_to_edge_edge_impacts(
    edges: &[[u32; 2]],
    ev_impacts: &[EdgeVertexImpact],
) -> Vec<EdgeEdgeImpact> {
    let mut ee_impacts = Vec::new();
    for impact in ev_impacts {
        let vid = impact.vertex_id.0;
        for (eid, e) in edges.iter().enumerate() {
            let alpha_b = if e[0] == vid {
                0.0
            } else if e[1] == vid {
                1.0
            } else {
                continue;
            };
            ee_impacts.push(EdgeEdgeImpact {
                edge_a_id: impact.edge_id,
                edge_b_id: EdgeId(eid as u32),
                time_of_impact: impact.time_of_impact,
                alpha_a: impact.alpha,
                alpha_b,
            });
        }
    }
    ee_impacts
}

/// For each edge, the index into `ee_impacts` of its earliest impact,
/// or [`NO_IMPACT`] if none mentions it.
///
/// Impacts are scanned in ascending TOI order (stable with respect to
/// list order on ties), and each edge keeps its first appearance.
pub fn prune_impacts(ee_impacts: &[EdgeEdgeImpact], num_edges: usize) -> Vec<i32> {
    let mut order: Vec<usize> = (0..ee_impacts.len()).collect();
    order.sort_by(|&a, &b| {
        ee_impacts[a]
            .time_of_impact
            .total_cmp(&ee_impacts[b].time_of_impact)
    });

    let mut edge_impact_map = vec![NO_IMPACT; num_edges];
    for idx in order {
        let impact = &ee_impacts[idx];
        for edge in [impact.edge_a_id, impact.edge_b_id] {
            let slot = &mut edge_impact_map[edge.index()];
            if *slot == NO_IMPACT {
                *slot = idx as i32;
            }
        }
    }
    edge_impact_map
}
