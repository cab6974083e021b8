//! Scene-global feature indexing.
//!
//! Candidates and impacts identify features by scene-global ids: each
//! body's vertices/edges/faces are offset by the totals of the bodies
//! before it. This is the minimal slice of the outer assembler's
//! contract the core needs to run over a body slice.

use helical_body::RigidBody;
use helical_types::{EdgeId, FaceId, VertexId};

/// Offset tables mapping between (body, local feature) and
/// scene-global feature ids.
#[derive(Debug, Clone)]
pub struct SceneIndex {
    vertex_offsets: Vec<u32>,
    edge_offsets: Vec<u32>,
    face_offsets: Vec<u32>,
    num_vertices: u32,
    num_edges: u32,
    num_faces: u32,
}

impl SceneIndex {
    /// Builds the offset tables for a body slice.
    pub fn new<const D: usize>(bodies: &[RigidBody<D>]) -> Self {
        let mut vertex_offsets = Vec::with_capacity(bodies.len());
        let mut edge_offsets = Vec::with_capacity(bodies.len());
        let mut face_offsets = Vec::with_capacity(bodies.len());
        let (mut nv, mut ne, mut nf) = (0u32, 0u32, 0u32);
        for body in bodies {
            vertex_offsets.push(nv);
            edge_offsets.push(ne);
            face_offsets.push(nf);
            nv += body.vertices.len() as u32;
            ne += body.edges.len() as u32;
            nf += body.faces.len() as u32;
        }
        Self {
            vertex_offsets,
            edge_offsets,
            face_offsets,
            num_vertices: nv,
            num_edges: ne,
            num_faces: nf,
        }
    }

    /// Total vertices across the scene.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices as usize
    }

    /// Total edges across the scene.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges as usize
    }

    /// Total faces across the scene.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.num_faces as usize
    }

    /// Scene-global id of a body-local vertex.
    #[inline]
    pub fn vertex_id(&self, body: usize, local: usize) -> VertexId {
        VertexId(self.vertex_offsets[body] + local as u32)
    }

    /// Scene-global id of a body-local edge.
    #[inline]
    pub fn edge_id(&self, body: usize, local: usize) -> EdgeId {
        EdgeId(self.edge_offsets[body] + local as u32)
    }

    /// Scene-global id of a body-local face.
    #[inline]
    pub fn face_id(&self, body: usize, local: usize) -> FaceId {
        FaceId(self.face_offsets[body] + local as u32)
    }

    /// Body index and local index of a scene-global vertex.
    #[inline]
    pub fn resolve_vertex(&self, id: VertexId) -> (usize, usize) {
        Self::resolve(&self.vertex_offsets, id.0)
    }

    /// Body index and local index of a scene-global edge.
    #[inline]
    pub fn resolve_edge(&self, id: EdgeId) -> (usize, usize) {
        Self::resolve(&self.edge_offsets, id.0)
    }

    /// Body index and local index of a scene-global face.
    #[inline]
    pub fn resolve_face(&self, id: FaceId) -> (usize, usize) {
        Self::resolve(&self.face_offsets, id.0)
    }

    #[inline]
    fn resolve(offsets: &[u32], id: u32) -> (usize, usize) {
        let body = offsets.partition_point(|&off| off <= id) - 1;
        (body, (id - offsets[body]) as usize)
    }

    /// The scene-global edge list: each edge as a pair of scene-global
    /// vertex ids, in global edge order.
    pub fn global_edges<const D: usize>(&self, bodies: &[RigidBody<D>]) -> Vec<[u32; 2]> {
        let mut edges = Vec::with_capacity(self.num_edges());
        for (b, body) in bodies.iter().enumerate() {
            let off = self.vertex_offsets[b];
            for e in &body.edges {
                edges.push([off + e[0], off + e[1]]);
            }
        }
        edges
    }
}
