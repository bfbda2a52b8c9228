//! Metrics computed from a simulation ensemble.
//!
//! Every calculator is a pure projection of an ensemble and returns `None`
//! for an empty one. Percentiles use the floor-index convention: the p-th
//! percentile of `n` sorted values is the element at `floor(n * p)`.
//!
//! ```ignore
//! use portsim_core::analysis::{risk_metrics, goal_probability, analyze_drawdowns};
//!
//! let ensemble = monte_carlo_simulate(&config)?;
//! let risk = risk_metrics(&ensemble);
//! let goal = goal_probability(&ensemble, 15_000.0);
//! let drawdowns = analyze_drawdowns(&ensemble);
//! ```

mod bands;
mod drawdown;
mod goal;
mod report;
mod risk;

pub use bands::*;
pub use drawdown::*;
pub use goal::*;
pub use report::*;
pub use risk::*;

/// Number of points the day-sampled curves aim for
pub const CURVE_POINTS: usize = 50;

/// Index of the p-th percentile (0-1) in a sorted slice of length `len > 0`
#[inline]
#[must_use]
pub fn percentile_index(len: usize, p: f64) -> usize {
    ((len as f64 * p).floor() as usize).min(len.saturating_sub(1))
}

/// p-th percentile (0-1) of an ascending slice
#[inline]
#[must_use]
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    sorted[percentile_index(sorted.len(), p)]
}

/// Sort ascending; NaNs go to the ends per `f64::total_cmp`
pub(crate) fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

/// Sampling step for a curve over `horizon_days`: ceil(horizon / 50)
#[must_use]
pub fn sample_step(horizon_days: usize) -> usize {
    horizon_days.div_ceil(CURVE_POINTS).max(1)
}

/// Days 0, step, 2*step, ... plus the horizon itself
#[must_use]
pub fn sampled_days(horizon_days: usize, step: usize) -> Vec<usize> {
    let mut days: Vec<usize> = (0..=horizon_days).step_by(step.max(1)).collect();
    if days.last() != Some(&horizon_days) {
        days.push(horizon_days);
    }
    days
}
