//! The rigid body type.
//!
//! Geometry lives in body space, centered on the center of mass; the
//! pose carries it to world space. The CCD core borrows bodies
//! read-only — nothing here mutates after construction except the
//! state poses, which belong to the outer time stepper.

use serde::{Deserialize, Serialize};

use helical_geometry::Aabb;
use helical_math::{Interval, Matrix, Scalar, Vector};
use helical_types::{HelicalError, HelicalResult};

use crate::mass;
use crate::pose::{Pose, RotationMatrix};

/// A rigid body: immutable body-space geometry, mass properties, and
/// the poses/velocities owned by the outer time stepper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody<const D: usize> {
    /// Vertex positions in body space, centered on the center of mass.
    pub vertices: Vec<Vector<f64, D>>,
    /// Vertex index pairs.
    pub edges: Vec<[u32; 2]>,
    /// Vertex index triples (empty in 2D).
    pub faces: Vec<[u32; 3]>,

    /// Total mass.
    pub mass: f64,
    /// Moments of inertia about the principal axes. 2D uses component
    /// 0 (the out-of-plane moment); 3D uses all three, descending.
    pub moment_of_inertia: [f64; 3],
    /// Rotation from the principal axes to the body frame.
    pub r0: Matrix<f64, D>,
    /// Maximum distance from the center of mass to a vertex.
    pub r_max: f64,
    /// Mean body-space edge length (zero for edgeless bodies).
    pub average_edge_length: f64,

    /// Per-DOF fixed flags in body frame; only the first `ndof`
    /// entries are meaningful.
    pub is_dof_fixed: [bool; 6],
    /// Bodies sharing a group never generate collision candidates
    /// against each other.
    pub group_id: u32,

    /// Current pose.
    pub pose: Pose<f64, D>,
    /// Previous-step pose.
    pub pose_prev: Pose<f64, D>,
    /// Current velocity (tangent pose).
    pub velocity: Pose<f64, D>,
    /// Constant external force (tangent pose).
    pub force: Pose<f64, D>,
}

impl<const D: usize> RigidBody<D> {
    /// Creates a rigid body from raw geometry.
    ///
    /// The input vertices may be anywhere; they are recentered on the
    /// center of mass and the pose position is shifted to compensate,
    /// so world-space positions are unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn from_points(
        vertices: Vec<Vector<f64, D>>,
        edges: Vec<[u32; 2]>,
        faces: Vec<[u32; 3]>,
        pose: Pose<f64, D>,
        velocity: Pose<f64, D>,
        force: Pose<f64, D>,
        density: f64,
        is_dof_fixed: [bool; 6],
        group_id: u32,
    ) -> HelicalResult<Self>
    where
        Pose<f64, D>: RotationMatrix<f64, D>,
    {
        if D != 2 && D != 3 {
            return Err(HelicalError::InvalidInput(format!(
                "rigid bodies are 2D or 3D, got dimension {D}"
            )));
        }
        if !(density > 0.0) {
            return Err(HelicalError::InvalidInput(format!(
                "density must be positive, got {density}"
            )));
        }

        let masses = mass::vertex_masses(&vertices, &edges, density);
        let com = mass::center_of_mass(&vertices, &masses);
        let mut vertices = vertices;
        for v in &mut vertices {
            *v = *v - com;
        }
        let mut pose = pose;
        pose.position = pose.position + pose.rotation_matrix().mul_vec(com);

        let (moment_of_inertia, r0) = Self::inertia(&vertices, &masses);

        let r_max = vertices
            .iter()
            .map(|v| v.norm())
            .fold(0.0_f64, f64::max);
        let average_edge_length = if edges.is_empty() {
            0.0
        } else {
            edges
                .iter()
                .map(|e| (vertices[e[1] as usize] - vertices[e[0] as usize]).norm())
                .sum::<f64>()
                / edges.len() as f64
        };

        let body = Self {
            vertices,
            edges,
            faces,
            mass: mass::total_mass(&masses),
            moment_of_inertia,
            r0,
            r_max,
            average_edge_length,
            is_dof_fixed,
            group_id,
            pose,
            pose_prev: pose,
            velocity,
            force,
        };
        body.validate()?;
        Ok(body)
    }

    /// Dimension-specific inertia: a scalar about the out-of-plane
    /// axis in 2D, principal moments and axes in 3D.
    fn inertia(vertices: &[Vector<f64, D>], masses: &[f64]) -> ([f64; 3], Matrix<f64, D>) {
        if D == 2 {
            let flat: Vec<Vector<f64, 2>> =
                vertices.iter().map(|v| Vector([v.0[0], v.0[1]])).collect();
            let i = mass::moment_of_inertia_2d(&flat, masses);
            ([i, 0.0, 0.0], Matrix::identity())
        } else {
            let solid: Vec<Vector<f64, 3>> = vertices
                .iter()
                .map(|v| Vector([v.0[0], v.0[1], v.0[2]]))
                .collect();
            let principal = mass::principal_inertia(mass::inertia_tensor_3d(&solid, masses));
            let mut r0 = Matrix::identity();
            for i in 0..D {
                for j in 0..D {
                    r0.0[i][j] = principal.rotation.col(j)[i];
                }
            }
            (principal.moments.into(), r0)
        }
    }

    /// Validates geometry integrity.
    ///
    /// Checks:
    /// - At least one vertex
    /// - Edge and face indices within bounds
    /// - No faces on 2D bodies
    /// - No degenerate (repeated-index) edges or faces
    pub fn validate(&self) -> HelicalResult<()> {
        let n = self.vertices.len() as u32;
        if n == 0 {
            return Err(HelicalError::InvalidBody("body has no vertices".into()));
        }
        if D == 2 && !self.faces.is_empty() {
            return Err(HelicalError::InvalidBody(
                "2D bodies cannot carry faces".into(),
            ));
        }
        for (i, e) in self.edges.iter().enumerate() {
            if e[0] >= n || e[1] >= n {
                return Err(HelicalError::InvalidBody(format!(
                    "edge {i} references vertex out of range"
                )));
            }
            if e[0] == e[1] {
                return Err(HelicalError::InvalidBody(format!("edge {i} is degenerate")));
            }
        }
        for (i, f) in self.faces.iter().enumerate() {
            if f.iter().any(|&v| v >= n) {
                return Err(HelicalError::InvalidBody(format!(
                    "face {i} references vertex out of range"
                )));
            }
            if f[0] == f[1] || f[1] == f[2] || f[0] == f[2] {
                return Err(HelicalError::InvalidBody(format!("face {i} is degenerate")));
            }
        }
        Ok(())
    }

    /// Spatial dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        D
    }

    /// Degrees of freedom of this body's pose.
    #[inline]
    pub fn ndof(&self) -> usize {
        Pose::<f64, D>::ndof()
    }

    /// World position of vertex `vertex_id` under `pose`.
    ///
    /// Evaluated on an interval pose (e.g. interpolated at an interval
    /// time), every coordinate of the result encloses the vertex's
    /// whole trajectory over that time span.
    #[inline]
    pub fn world_vertex<S: Scalar>(&self, pose: &Pose<S, D>, vertex_id: usize) -> Vector<S, D>
    where
        Pose<S, D>: RotationMatrix<S, D>,
    {
        pose.rotation_matrix()
            .mul_vec(Vector::from_f64(self.vertices[vertex_id]))
            + pose.position
    }

    /// World positions of all vertices under `pose`.
    pub fn world_vertices<S: Scalar>(&self, pose: &Pose<S, D>) -> Vec<Vector<S, D>>
    where
        Pose<S, D>: RotationMatrix<S, D>,
    {
        let r = pose.rotation_matrix();
        self.vertices
            .iter()
            .map(|v| r.mul_vec(Vector::from_f64(*v)) + pose.position)
            .collect()
    }

    /// World vertices at the previous-step pose.
    pub fn world_vertices_t0(&self) -> Vec<Vector<f64, D>>
    where
        Pose<f64, D>: RotationMatrix<f64, D>,
    {
        self.world_vertices(&self.pose_prev)
    }

    /// World vertices at the current pose.
    pub fn world_vertices_t1(&self) -> Vec<Vector<f64, D>>
    where
        Pose<f64, D>: RotationMatrix<f64, D>,
    {
        self.world_vertices(&self.pose)
    }

    /// AABB of the trajectory of vertex `vertex_id` as the body moves
    /// from `pose_t0` to `pose_t1`, inflated by `inflation`.
    ///
    /// The box is the interval enclosure of `world_vertex` at
    /// `t = [0, 1]`, so it bounds the entire swept path including the
    /// curvature of the rotational part.
    pub fn swept_vertex_aabb(
        &self,
        pose_t0: &Pose<f64, D>,
        pose_t1: &Pose<f64, D>,
        vertex_id: usize,
        inflation: f64,
    ) -> Aabb<D>
    where
        Pose<Interval, D>: RotationMatrix<Interval, D>,
    {
        let p0 = pose_t0.cast::<Interval>();
        let p1 = pose_t1.cast::<Interval>();
        let swept = Pose::interpolate(&p0, &p1, Interval::UNIT);
        Aabb::from_intervals(self.world_vertex(&swept, vertex_id)).inflate(inflation)
    }

    /// Union of the endpoint trajectories of edge `edge_id`.
    pub fn swept_edge_aabb(
        &self,
        pose_t0: &Pose<f64, D>,
        pose_t1: &Pose<f64, D>,
        edge_id: usize,
        inflation: f64,
    ) -> Aabb<D>
    where
        Pose<Interval, D>: RotationMatrix<Interval, D>,
    {
        let e = self.edges[edge_id];
        let a = self.swept_vertex_aabb(pose_t0, pose_t1, e[0] as usize, inflation);
        let b = self.swept_vertex_aabb(pose_t0, pose_t1, e[1] as usize, inflation);
        a.union(&b)
    }

    /// Union of the corner trajectories of face `face_id`.
    pub fn swept_face_aabb(
        &self,
        pose_t0: &Pose<f64, D>,
        pose_t1: &Pose<f64, D>,
        face_id: usize,
        inflation: f64,
    ) -> Aabb<D>
    where
        Pose<Interval, D>: RotationMatrix<Interval, D>,
    {
        let f = self.faces[face_id];
        let a = self.swept_vertex_aabb(pose_t0, pose_t1, f[0] as usize, inflation);
        let b = self.swept_vertex_aabb(pose_t0, pose_t1, f[1] as usize, inflation);
        let c = self.swept_vertex_aabb(pose_t0, pose_t1, f[2] as usize, inflation);
        a.union(&b).union(&c)
    }
}
