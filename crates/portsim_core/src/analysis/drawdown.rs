//! Peak-to-trough analysis
//!
//! Drawdown on day `t` is `(peak - value) / peak` where `peak` is the running
//! maximum up to `t`. Values are clamped to `[0, 1]` so that paths which go
//! negative report a total loss rather than more than one.

use super::{percentile_of_sorted, sample_step, sampled_days, sorted};
use crate::model::{DrawdownCurvePoint, DrawdownProfile, SimulationEnsemble, SimulationPath};

/// Drawdown as a fraction in [0, 1]
fn drawdown(peak: f64, value: f64) -> f64 {
    let dd = (peak - value) / peak;
    if dd.is_nan() { 0.0 } else { dd.clamp(0.0, 1.0) }
}

/// Drawdown series of one path, day 0 through the horizon
#[must_use]
pub fn drawdown_series(path: &SimulationPath) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    path.values()
        .map(|v| {
            if v > peak {
                peak = v;
            }
            drawdown(peak, v)
        })
        .collect()
}

/// Largest drawdown of one path as a fraction in [0, 1]
#[must_use]
pub fn max_drawdown(path: &SimulationPath) -> f64 {
    drawdown_series(path).into_iter().fold(0.0, f64::max)
}

/// Distribution of maximum drawdowns plus a day-sampled drawdown curve
#[must_use]
pub fn analyze_drawdowns(ensemble: &SimulationEnsemble) -> Option<DrawdownProfile> {
    if ensemble.is_empty() {
        return None;
    }

    let series: Vec<Vec<f64>> = ensemble.paths.iter().map(drawdown_series).collect();
    let max_drawdowns = sorted(
        series
            .iter()
            .map(|s| s.iter().copied().fold(0.0, f64::max))
            .collect(),
    );
    let n = max_drawdowns.len();

    let days = sampled_days(ensemble.horizon_days, sample_step(ensemble.horizon_days));
    let curve = days
        .into_iter()
        .map(|day| {
            let cross = sorted(series.iter().filter_map(|s| s.get(day).copied()).collect());
            if cross.is_empty() {
                return DrawdownCurvePoint {
                    day,
                    p10: 0.0,
                    median: 0.0,
                    p90: 0.0,
                    worst: 0.0,
                };
            }
            DrawdownCurvePoint {
                day,
                p10: percentile_of_sorted(&cross, 0.10) * 100.0,
                median: percentile_of_sorted(&cross, 0.50) * 100.0,
                p90: percentile_of_sorted(&cross, 0.90) * 100.0,
                worst: cross[cross.len() - 1] * 100.0,
            }
        })
        .collect();

    Some(DrawdownProfile {
        median_max_drawdown: percentile_of_sorted(&max_drawdowns, 0.50) * 100.0,
        p90_max_drawdown: percentile_of_sorted(&max_drawdowns, 0.90) * 100.0,
        p95_max_drawdown: percentile_of_sorted(&max_drawdowns, 0.95) * 100.0,
        worst_max_drawdown: max_drawdowns[n - 1] * 100.0,
        average_max_drawdown: max_drawdowns.iter().sum::<f64>() / n as f64 * 100.0,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Regime;

    fn path(values: &[f64]) -> SimulationPath {
        let mut p = SimulationPath::with_capacity(values.len() - 1);
        for (day, &v) in values.iter().enumerate() {
            p.push(day, v, Regime::Bull);
        }
        p
    }

    fn ensemble(paths: Vec<SimulationPath>) -> SimulationEnsemble {
        let horizon_days = paths.first().map_or(0, |p| p.len() - 1);
        SimulationEnsemble {
            initial_capital: 100.0,
            horizon_days,
            base_seed: 0,
            paths,
        }
    }

    #[test]
    fn test_max_drawdown_uses_running_peak() {
        let p = path(&[100.0, 120.0, 90.0, 130.0, 117.0]);
        // Trough after the 120 peak: 25%
        assert!((max_drawdown(&p) - 0.25).abs() < 1e-12);

        let series = drawdown_series(&p);
        assert_eq!(series[0], 0.0);
        assert_eq!(series[1], 0.0);
        assert!((series[4] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_path_has_no_drawdown() {
        let p = path(&[100.0, 101.0, 102.0, 103.0]);
        assert_eq!(max_drawdown(&p), 0.0);
    }

    #[test]
    fn test_negative_values_clamp_to_total_loss() {
        let p = path(&[100.0, 50.0, -20.0, -40.0]);
        assert_eq!(max_drawdown(&p), 1.0);
    }

    #[test]
    fn test_profile_statistics() {
        let e = ensemble(vec![
            path(&[100.0, 90.0, 95.0]),  // 10%
            path(&[100.0, 110.0, 88.0]), // 20%
            path(&[100.0, 101.0, 102.0]), // 0%
            path(&[100.0, 60.0, 70.0]),  // 40%
        ]);
        let profile = analyze_drawdowns(&e).unwrap();
        // Sorted: 0, 10, 20, 40
        assert!((profile.median_max_drawdown - 20.0).abs() < 1e-9);
        assert!((profile.p90_max_drawdown - 40.0).abs() < 1e-9);
        assert!((profile.p95_max_drawdown - 40.0).abs() < 1e-9);
        assert!((profile.worst_max_drawdown - 40.0).abs() < 1e-9);
        assert!((profile.average_max_drawdown - 17.5).abs() < 1e-9);

        // Horizon 2: step 1, every day sampled
        let days: Vec<usize> = profile.curve.iter().map(|c| c.day).collect();
        assert_eq!(days, vec![0, 1, 2]);
        assert_eq!(profile.curve[0].worst, 0.0);
        assert!((profile.curve[1].worst - 40.0).abs() < 1e-9);
        // Day 2 cross-section: 5, 20, 0, 30 -> sorted 0, 5, 20, 30
        assert!((profile.curve[2].median - 20.0).abs() < 1e-9);
        assert!((profile.curve[2].p10 - 0.0).abs() < 1e-9);
        assert!((profile.curve[2].worst - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_curve_is_sampled_and_ends_at_horizon() {
        let values: Vec<f64> = (0..=120).map(|d| 100.0 + (d % 7) as f64).collect();
        let profile = analyze_drawdowns(&ensemble(vec![path(&values)])).unwrap();
        // ceil(120 / 50) = 3
        assert_eq!(profile.curve[1].day, 3);
        assert_eq!(profile.curve.last().unwrap().day, 120);
        assert!(profile.curve.iter().all(|c| (0.0..=100.0).contains(&c.worst)));
    }

    #[test]
    fn test_empty_ensemble() {
        assert!(analyze_drawdowns(&ensemble(Vec::new())).is_none());
    }
}
