//! Rigid-body poses and rotation matrix construction.
//!
//! A pose is a position plus rotation parameters: a single angle in 2D,
//! an axis-angle vector in 3D (`|rotation|` is the angle). Interpolating
//! two poses interpolates *both* linearly — screw motion — which is the
//! trajectory model the whole CCD core assumes.

use serde::{Deserialize, Serialize};

use helical_math::{Matrix, Scalar, Vector, Vector3};

/// A rigid-body configuration, generic over scalar type so the same
/// pose code runs on `f64` and on intervals.
///
/// Also reused as a tangent quantity (velocity, force) since those live
/// in the same parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose<S, const D: usize> {
    /// Position of the center of mass.
    pub position: Vector<S, D>,
    /// Rotation parameters. 2D uses component 0 (the angle, with the
    /// remaining components zero); 3D uses all three as axis-angle.
    pub rotation: Vector3<S>,
}

impl<S: Scalar, const D: usize> Pose<S, D> {
    /// Creates a pose from parts.
    #[inline]
    pub fn new(position: Vector<S, D>, rotation: Vector3<S>) -> Self {
        Self { position, rotation }
    }

    /// The identity pose (origin, no rotation).
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector::zero(),
            rotation: Vector::zero(),
        }
    }

    /// Positional degrees of freedom.
    #[inline]
    pub const fn pos_ndof() -> usize {
        D
    }

    /// Rotational degrees of freedom.
    #[inline]
    pub const fn rot_ndof() -> usize {
        if D == 2 {
            1
        } else {
            3
        }
    }

    /// Total degrees of freedom.
    #[inline]
    pub const fn ndof() -> usize {
        Self::pos_ndof() + Self::rot_ndof()
    }

    /// Linear interpolation of position and rotation parameters at
    /// parameter `t` (screw motion). `t = 0` gives `p0`, `t = 1` gives
    /// `p1`; an interval `t` yields a pose enclosure over that span.
    #[inline]
    pub fn interpolate(p0: &Self, p1: &Self, t: S) -> Self {
        Self {
            position: p0.position + (p1.position - p0.position).scale(t),
            rotation: p0.rotation + (p1.rotation - p0.rotation).scale(t),
        }
    }
}

impl<S: Scalar, const D: usize> std::ops::Add for Pose<S, D> {
    type Output = Self;

    /// Component-wise addition in parameter space, for tangent poses
    /// (velocities, displacements).
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            position: self.position + rhs.position,
            rotation: self.rotation + rhs.rotation,
        }
    }
}

impl<S: Scalar, const D: usize> Pose<S, D> {
    /// Scales every parameter, for tangent poses.
    #[inline]
    pub fn scale(self, s: S) -> Self {
        Self {
            position: self.position.scale(s),
            rotation: self.rotation.scale(s),
        }
    }
}

impl<const D: usize> Pose<f64, D> {
    /// Embeds this pose into another scalar type (typically
    /// `Interval`) for enclosure evaluation.
    #[inline]
    pub fn cast<S: Scalar>(&self) -> Pose<S, D> {
        Pose {
            position: Vector::from_f64(self.position),
            rotation: Vector::from_f64(self.rotation),
        }
    }
}

impl<S: Scalar> Pose<S, 2> {
    /// Builds a planar pose from a position and an angle.
    #[inline]
    pub fn from_position_angle(position: Vector<S, 2>, angle: S) -> Self {
        Self {
            position,
            rotation: Vector3::new(angle, S::zero(), S::zero()),
        }
    }

    /// The planar rotation angle.
    #[inline]
    pub fn angle(&self) -> S {
        self.rotation[0]
    }
}

/// Rotation matrix construction, implemented per dimension.
pub trait RotationMatrix<S: Scalar, const D: usize> {
    /// The rotation matrix of this pose's rotation parameters.
    fn rotation_matrix(&self) -> Matrix<S, D>;
}

impl<S: Scalar> RotationMatrix<S, 2> for Pose<S, 2> {
    #[inline]
    fn rotation_matrix(&self) -> Matrix<S, 2> {
        let c = self.angle().cos();
        let s = self.angle().sin();
        Matrix::from_rows([[c, -s], [s, c]])
    }
}

impl<S: Scalar> RotationMatrix<S, 3> for Pose<S, 3> {
    /// Exponential map of the axis-angle vector, in the division-free
    /// form `R = I + sinc(θ)·K + versc(θ)·K²` with `K = hat(r)` and
    /// `θ = |r|`. Exact for all angles and sound at `θ = 0`, where the
    /// normalized-axis form would divide by zero.
    fn rotation_matrix(&self) -> Matrix<S, 3> {
        let r = self.rotation;
        let theta = r.norm();
        let k = hat(r);
        Matrix::identity() + k.scale(theta.sinc()) + (k * k).scale(theta.versc())
    }
}

/// The skew-symmetric cross-product matrix of `r`.
#[inline]
fn hat<S: Scalar>(r: Vector3<S>) -> Matrix<S, 3> {
    let o = S::zero();
    let [rx, ry, rz] = r.0;
    Matrix::from_rows([[o, -rz, ry], [rz, o, -rx], [-ry, rx, o]])
}
