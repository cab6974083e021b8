//! Conservative interval root-finder.
//!
//! Locates the first time in a domain interval where a signed distance
//! can be zero *and* the contact can lie inside the finite features.
//! Both tests are conservative: a subinterval is discarded only when
//! the enclosure proves no root or the containment predicate certainly
//! fails, so the returned interval always brackets the true earliest
//! root when one exists.

use helical_math::{Interval, Ternary};
use helical_types::{HelicalError, HelicalResult};

/// Searches `domain` for the leftmost interval of width at most `tol`
/// on which `distance` may vanish and `inside` may hold.
///
/// Returns `Ok(Some(t))` with `t.lo` the conservative time of impact,
/// `Ok(None)` when the whole domain is safely impact-free. `distance`
/// must be an interval extension of the true distance function:
/// for every `x` in `j`, `distance(j)` contains the true value at `x`.
///
/// Depth-first bisection: the right half is pushed before the left so
/// the earliest root is reached first. The working stack is local, so
/// calls are re-entrant.
pub fn interval_root_finder<F, C>(
    mut distance: F,
    mut inside: C,
    domain: Interval,
    tol: f64,
) -> HelicalResult<Option<Interval>>
where
    F: FnMut(Interval) -> Interval,
    C: FnMut(Interval) -> HelicalResult<Ternary>,
{
    if !(tol > 0.0) {
        return Err(HelicalError::InvalidInput(format!(
            "root-finder tolerance must be positive, got {tol}"
        )));
    }

    let mut stack = vec![domain];
    while let Some(j) = stack.pop() {
        if !distance(j).contains_zero() {
            continue;
        }
        if !inside(j)?.is_possible() {
            continue;
        }
        if j.width() <= tol {
            return Ok(Some(j));
        }
        let mid = j.midpoint();
        if mid <= j.lo || mid >= j.hi {
            // tol is below the local float spacing; this is as tight
            // as the interval can get.
            return Ok(Some(j));
        }
        stack.push(Interval::new(mid, j.hi));
        stack.push(Interval::new(j.lo, mid));
    }
    Ok(None)
}
