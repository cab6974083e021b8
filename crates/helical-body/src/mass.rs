//! Mass properties of rigid-body meshes.
//!
//! Vertices carry point masses derived from the length of their
//! incident edges (half of each incident edge's length times density);
//! meshes without edges fall back to uniform vertex masses. Moments of
//! inertia are taken about the center of mass: a scalar about the
//! out-of-plane axis in 2D, principal moments plus the principal-axes
//! rotation in 3D.

use glam::{DMat3, DVec3};

use helical_math::Vector;

/// Number of Jacobi sweeps for the symmetric 3×3 eigendecomposition.
/// Convergence is quadratic; five sweeps reach machine precision.
const JACOBI_SWEEPS: usize = 5;

/// Principal moments of inertia and the rotation from the principal
/// axes to the body frame.
#[derive(Debug, Clone, Copy)]
pub struct PrincipalInertia {
    /// Principal moments, descending.
    pub moments: DVec3,
    /// Columns are the principal axes expressed in body frame.
    pub rotation: DMat3,
}

/// Per-vertex masses from edge lengths.
pub fn vertex_masses<const D: usize>(
    vertices: &[Vector<f64, D>],
    edges: &[[u32; 2]],
    density: f64,
) -> Vec<f64> {
    let mut masses = vec![0.0; vertices.len()];
    if edges.is_empty() {
        masses.fill(density);
        return masses;
    }
    for e in edges {
        let a = vertices[e[0] as usize];
        let b = vertices[e[1] as usize];
        let half = 0.5 * (b - a).norm() * density;
        masses[e[0] as usize] += half;
        masses[e[1] as usize] += half;
    }
    // An isolated vertex still needs inertia.
    for m in &mut masses {
        if *m == 0.0 {
            *m = density;
        }
    }
    masses
}

/// Total mass.
#[inline]
pub fn total_mass(masses: &[f64]) -> f64 {
    masses.iter().sum()
}

/// Mass-weighted center of the vertex set.
pub fn center_of_mass<const D: usize>(
    vertices: &[Vector<f64, D>],
    masses: &[f64],
) -> Vector<f64, D> {
    let total = total_mass(masses);
    let mut com = [0.0; D];
    for (v, &m) in vertices.iter().zip(masses) {
        for i in 0..D {
            com[i] += m * v.0[i];
        }
    }
    for c in &mut com {
        *c /= total;
    }
    Vector(com)
}

/// Moment of inertia about the out-of-plane axis through the origin
/// (vertices are expected centered on the center of mass).
pub fn moment_of_inertia_2d(vertices: &[Vector<f64, 2>], masses: &[f64]) -> f64 {
    vertices
        .iter()
        .zip(masses)
        .map(|(v, &m)| m * (v.0[0] * v.0[0] + v.0[1] * v.0[1]))
        .sum()
}

/// Point-mass inertia tensor about the origin (vertices are expected
/// centered on the center of mass).
pub fn inertia_tensor_3d(vertices: &[Vector<f64, 3>], masses: &[f64]) -> DMat3 {
    let mut tensor = DMat3::ZERO;
    for (v, &m) in vertices.iter().zip(masses) {
        let p = DVec3::from(*v);
        let outer = DMat3::from_cols(p * p.x, p * p.y, p * p.z);
        tensor += (DMat3::IDENTITY * p.length_squared() - outer) * m;
    }
    tensor
}

/// Principal moments and axes of a symmetric inertia tensor, via
/// cyclic Jacobi rotations.
pub fn principal_inertia(tensor: DMat3) -> PrincipalInertia {
    let mut a = tensor;
    let mut v = DMat3::IDENTITY;

    for _ in 0..JACOBI_SWEEPS {
        for &(p, q) in &[(0usize, 1usize), (0, 2), (1, 2)] {
            let apq = a.col(q)[p];
            if apq.abs() < 1.0e-15 {
                continue;
            }
            let app = a.col(p)[p];
            let aqq = a.col(q)[q];
            let theta = 0.5 * (2.0 * apq).atan2(app - aqq);
            let (s, c) = theta.sin_cos();
            let rot = jacobi_rotation(p, q, c, s);
            a = rot.transpose() * a * rot;
            v = v * rot;
        }
    }

    // Sort descending, permuting the axis columns alongside.
    let mut pairs = [
        (a.col(0)[0], v.col(0)),
        (a.col(1)[1], v.col(1)),
        (a.col(2)[2], v.col(2)),
    ];
    pairs.sort_by(|x, y| y.0.total_cmp(&x.0));

    PrincipalInertia {
        moments: DVec3::new(pairs[0].0, pairs[1].0, pairs[2].0),
        rotation: DMat3::from_cols(pairs[0].1, pairs[1].1, pairs[2].1),
    }
}

/// Givens rotation in the `(p, q)` plane.
fn jacobi_rotation(p: usize, q: usize, c: f64, s: f64) -> DMat3 {
    let mut cols = [DVec3::X, DVec3::Y, DVec3::Z];
    cols[p][p] = c;
    cols[p][q] = s;
    cols[q][p] = -s;
    cols[q][q] = c;
    DMat3::from_cols(cols[0], cols[1], cols[2])
}
