//! Detection options.
//!
//! Parameters that bound the cost and resolution of a detection call:
//! the search interval, the root-finder tolerance, broad-phase
//! inflation, and grid sizing.

use serde::{Deserialize, Serialize};

use helical_types::{constants, HelicalError, HelicalResult};

/// Configuration for a collision detection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcdOptions {
    /// Upper bound of the TOI search interval `[0, earliest_toi]`.
    /// Shrinking it bounds worst-case narrow-phase cost.
    pub earliest_toi: f64,

    /// Width tolerance of the interval root-finder. Worst-case
    /// subdivisions per candidate ≈ `log2(earliest_toi / tolerance)`.
    pub toi_tolerance: f64,

    /// Uniform Minkowski inflation applied to every swept AABB in the
    /// broad phase.
    pub inflation_radius: f64,

    /// Hash-grid cell size as a multiple of the mean swept edge
    /// length.
    pub cell_size_factor: f64,
}

impl Default for CcdOptions {
    fn default() -> Self {
        Self {
            earliest_toi: constants::DEFAULT_EARLIEST_TOI,
            toi_tolerance: constants::DEFAULT_TOI_TOLERANCE,
            inflation_radius: constants::DEFAULT_INFLATION_RADIUS,
            cell_size_factor: constants::DEFAULT_CELL_SIZE_FACTOR,
        }
    }
}

impl CcdOptions {
    /// A tighter configuration for line searches that need sharp TOI
    /// bounds.
    pub fn tight() -> Self {
        Self {
            toi_tolerance: 1.0e-8,
            ..Default::default()
        }
    }

    /// A looser configuration for quick rejection passes.
    pub fn coarse() -> Self {
        Self {
            toi_tolerance: 1.0e-4,
            ..Default::default()
        }
    }

    /// Rejects out-of-range parameters.
    pub fn validate(&self) -> HelicalResult<()> {
        if !(self.earliest_toi >= 0.0) {
            return Err(HelicalError::InvalidInput(format!(
                "earliest_toi must be nonnegative, got {}",
                self.earliest_toi
            )));
        }
        if !(self.toi_tolerance > 0.0) {
            return Err(HelicalError::InvalidInput(format!(
                "toi_tolerance must be positive, got {}",
                self.toi_tolerance
            )));
        }
        if !(self.inflation_radius >= 0.0) {
            return Err(HelicalError::InvalidInput(format!(
                "inflation_radius must be nonnegative, got {}",
                self.inflation_radius
            )));
        }
        if !(self.cell_size_factor >= 1.0) {
            return Err(HelicalError::InvalidInput(format!(
                "cell_size_factor must be at least 1, got {}",
                self.cell_size_factor
            )));
        }
        Ok(())
    }
}
