//! Numeric defaults for the CCD core.

/// Default width tolerance for the interval root-finder (in units of
/// normalized step time).
pub const DEFAULT_TOI_TOLERANCE: f64 = 1.0e-6;

/// Default upper bound of the time-of-impact search interval.
pub const DEFAULT_EARLIEST_TOI: f64 = 1.0;

/// Default multiple of the mean swept edge length used as the
/// hash-grid cell size. Cells ~2× the feature size keep per-cell
/// occupancy low without exploding the number of cells.
pub const DEFAULT_CELL_SIZE_FACTOR: f64 = 2.0;

/// Default Minkowski inflation applied to swept bounding boxes.
pub const DEFAULT_INFLATION_RADIUS: f64 = 0.0;

/// Smallest admissible hash-grid cell size.
pub const MIN_CELL_SIZE: f64 = 1.0e-9;
