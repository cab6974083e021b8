//! Uniform spatial hash over swept bounding boxes.
//!
//! Each feature's swept AABB is inserted into every grid cell it
//! overlaps; candidate pairs are features of different kinds (or the
//! same kind, for edge-edge) that co-occupy at least one cell. The
//! grid is transient: built, queried, and dropped inside one broad
//! phase call.
//!
//! Cell keys are floored world coordinates over the cell size; 2D
//! scenes collapse the third key component to zero.

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;

use helical_geometry::Aabb;
use helical_types::constants::MIN_CELL_SIZE;

/// One grid cell's occupants, by feature kind.
#[derive(Debug, Default)]
struct Cell {
    vertices: SmallVec<[u32; 4]>,
    edges: SmallVec<[u32; 4]>,
    faces: SmallVec<[u32; 4]>,
}

/// A uniform spatial hash grid over `D`-dimensional AABBs.
#[derive(Debug)]
pub struct HashGrid<const D: usize> {
    inv_cell_size: f64,
    cells: AHashMap<(i64, i64, i64), Cell>,
}

/// Floor to `i64`, saturating instead of wrapping on huge coordinates.
#[inline]
fn floor_sat(x: f64) -> i64 {
    if !x.is_finite() {
        return if x.is_sign_positive() { i64::MAX } else { i64::MIN };
    }
    let f = x.floor();
    if f >= i64::MAX as f64 {
        i64::MAX
    } else if f <= i64::MIN as f64 {
        i64::MIN
    } else {
        f as i64
    }
}

impl<const D: usize> HashGrid<D> {
    /// Creates a grid with the given cell size (clamped positive).
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(MIN_CELL_SIZE)
        } else {
            MIN_CELL_SIZE
        };
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: AHashMap::new(),
        }
    }

    /// Key range `[lo, hi]` of cells an AABB overlaps.
    fn cell_range(&self, aabb: &Aabb<D>) -> ([i64; 3], [i64; 3]) {
        let mut lo = [0i64; 3];
        let mut hi = [0i64; 3];
        for i in 0..D {
            lo[i] = floor_sat(aabb.min[i] * self.inv_cell_size);
            hi[i] = floor_sat(aabb.max[i] * self.inv_cell_size);
        }
        (lo, hi)
    }

    fn insert(&mut self, id: u32, aabb: &Aabb<D>, kind: fn(&mut Cell) -> &mut SmallVec<[u32; 4]>) {
        let (lo, hi) = self.cell_range(aabb);
        for x in lo[0]..=hi[0] {
            for y in lo[1]..=hi[1] {
                for z in lo[2]..=hi[2] {
                    kind(self.cells.entry((x, y, z)).or_default()).push(id);
                }
            }
        }
    }

    /// Inserts a vertex's swept AABB.
    pub fn insert_vertex(&mut self, id: u32, aabb: &Aabb<D>) {
        self.insert(id, aabb, |c| &mut c.vertices);
    }

    /// Inserts an edge's swept AABB.
    pub fn insert_edge(&mut self, id: u32, aabb: &Aabb<D>) {
        self.insert(id, aabb, |c| &mut c.edges);
    }

    /// Inserts a face's swept AABB.
    pub fn insert_face(&mut self, id: u32, aabb: &Aabb<D>) {
        self.insert(id, aabb, |c| &mut c.faces);
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Deduplicated `(edge, vertex)` co-occupancy pairs, sorted.
    pub fn edge_vertex_pairs(&self) -> Vec<(u32, u32)> {
        let mut seen = AHashSet::new();
        for cell in self.cells.values() {
            for &e in &cell.edges {
                for &v in &cell.vertices {
                    seen.insert((e, v));
                }
            }
        }
        Self::sorted(seen)
    }

    /// Deduplicated `(edge, edge)` co-occupancy pairs with the lower
    /// id first, sorted.
    pub fn edge_edge_pairs(&self) -> Vec<(u32, u32)> {
        let mut seen = AHashSet::new();
        for cell in self.cells.values() {
            for (i, &a) in cell.edges.iter().enumerate() {
                for &b in &cell.edges[i + 1..] {
                    if a != b {
                        seen.insert((a.min(b), a.max(b)));
                    }
                }
            }
        }
        Self::sorted(seen)
    }

    /// Deduplicated `(face, vertex)` co-occupancy pairs, sorted.
    pub fn face_vertex_pairs(&self) -> Vec<(u32, u32)> {
        let mut seen = AHashSet::new();
        for cell in self.cells.values() {
            for &f in &cell.faces {
                for &v in &cell.vertices {
                    seen.insert((f, v));
                }
            }
        }
        Self::sorted(seen)
    }

    /// Hash-map traversal order is arbitrary; sorting keeps the broad
    /// phase deterministic.
    fn sorted(set: AHashSet<(u32, u32)>) -> Vec<(u32, u32)> {
        let mut pairs: Vec<_> = set.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}
