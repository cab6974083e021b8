//! Procedural shape generators for tests and fixtures.
//!
//! Each generator returns body-space geometry ready for
//! [`RigidBody::from_points`](crate::RigidBody::from_points).

use glam::DVec3;

use helical_math::{Vector, Vector2, Vector3};

/// A horizontal segment of the given length centered at the origin.
pub fn segment(length: f64) -> (Vec<Vector2<f64>>, Vec<[u32; 2]>) {
    let h = 0.5 * length;
    (
        vec![Vector2::new(-h, 0.0), Vector2::new(h, 0.0)],
        vec![[0, 1]],
    )
}

/// A single free vertex at the origin.
pub fn single_point<const D: usize>() -> Vec<Vector<f64, D>> {
    vec![Vector([0.0; D])]
}

/// A regular `n`-gon of the given circumradius, counter-clockwise,
/// with boundary edges.
pub fn regular_polygon(n: usize, radius: f64) -> (Vec<Vector2<f64>>, Vec<[u32; 2]>) {
    assert!(n >= 3, "a polygon needs at least 3 vertices");
    let vertices = (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            Vector2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    let edges = (0..n).map(|i| [i as u32, ((i + 1) % n) as u32]).collect();
    (vertices, edges)
}

/// An axis-aligned box with the given half extents, triangulated, with
/// the edges of the triangulation.
#[allow(clippy::type_complexity)]
pub fn axis_aligned_box(
    half_extents: DVec3,
) -> (Vec<Vector3<f64>>, Vec<[u32; 2]>, Vec<[u32; 3]>) {
    let h = half_extents;
    let vertices: Vec<Vector3<f64>> = [
        DVec3::new(-h.x, -h.y, -h.z),
        DVec3::new(h.x, -h.y, -h.z),
        DVec3::new(h.x, h.y, -h.z),
        DVec3::new(-h.x, h.y, -h.z),
        DVec3::new(-h.x, -h.y, h.z),
        DVec3::new(h.x, -h.y, h.z),
        DVec3::new(h.x, h.y, h.z),
        DVec3::new(-h.x, h.y, h.z),
    ]
    .into_iter()
    .map(Vector3::from)
    .collect();

    let faces = vec![
        // -z
        [0, 2, 1],
        [0, 3, 2],
        // +z
        [4, 5, 6],
        [4, 6, 7],
        // -y
        [0, 1, 5],
        [0, 5, 4],
        // +y
        [2, 3, 7],
        [2, 7, 6],
        // -x
        [0, 4, 7],
        [0, 7, 3],
        // +x
        [1, 2, 6],
        [1, 6, 5],
    ];
    let edges = edges_from_faces(&faces);
    (vertices, edges, faces)
}

/// A regular tetrahedron with the given circumradius.
#[allow(clippy::type_complexity)]
pub fn tetrahedron(radius: f64) -> (Vec<Vector3<f64>>, Vec<[u32; 2]>, Vec<[u32; 3]>) {
    let s = radius / 3.0_f64.sqrt();
    let vertices: Vec<Vector3<f64>> = [
        DVec3::new(s, s, s),
        DVec3::new(s, -s, -s),
        DVec3::new(-s, s, -s),
        DVec3::new(-s, -s, s),
    ]
    .into_iter()
    .map(Vector3::from)
    .collect();
    let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    let edges = edges_from_faces(&faces);
    (vertices, edges, faces)
}

/// The unique undirected edges of a triangle list, sorted.
pub fn edges_from_faces(faces: &[[u32; 3]]) -> Vec<[u32; 2]> {
    let mut edges: Vec<[u32; 2]> = faces
        .iter()
        .flat_map(|f| [[f[0], f[1]], [f[1], f[2]], [f[2], f[0]]])
        .map(|[a, b]| if a <= b { [a, b] } else { [b, a] })
        .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}
