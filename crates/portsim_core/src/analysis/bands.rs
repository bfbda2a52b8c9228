use super::{percentile_index, percentile_of_sorted, sampled_days, sorted};
use crate::model::{BandPoint, PercentileBands, SimulationEnsemble, ValuePercentiles};

/// Percentiles reported by fan charts
pub const BAND_PERCENTILES: [f64; 5] = [0.10, 0.25, 0.50, 0.75, 0.90];

/// Cross-sectional value percentiles every `step` days (plus the horizon)
#[must_use]
pub fn percentile_bands(ensemble: &SimulationEnsemble, step: usize) -> Option<PercentileBands> {
    if ensemble.is_empty() {
        return None;
    }

    let bands = sampled_days(ensemble.horizon_days, step)
        .into_iter()
        .filter_map(|day| {
            let values = sorted(ensemble.values_at(day));
            (!values.is_empty()).then(|| BandPoint {
                day,
                values: ValuePercentiles {
                    p10: percentile_of_sorted(&values, 0.10),
                    p25: percentile_of_sorted(&values, 0.25),
                    p50: percentile_of_sorted(&values, 0.50),
                    p75: percentile_of_sorted(&values, 0.75),
                    p90: percentile_of_sorted(&values, 0.90),
                },
            })
        })
        .collect();

    Some(PercentileBands {
        bands,
        percentile_paths: percentile_path_indices(ensemble, &BAND_PERCENTILES),
    })
}

/// For each percentile, the index of the path whose final value sits at that
/// rank. Ties keep simulation order.
#[must_use]
pub fn percentile_path_indices(
    ensemble: &SimulationEnsemble,
    percentiles: &[f64],
) -> Vec<(f64, usize)> {
    let finals = ensemble.final_values();
    if finals.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..finals.len()).collect();
    order.sort_by(|&a, &b| finals[a].total_cmp(&finals[b]));

    percentiles
        .iter()
        .map(|&p| (p, order[percentile_index(order.len(), p)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sample_step;
    use crate::model::{Regime, SimulationPath};

    fn linear_ensemble(finals: &[f64], horizon_days: usize) -> SimulationEnsemble {
        let paths = finals
            .iter()
            .map(|&end| {
                let mut p = SimulationPath::with_capacity(horizon_days);
                for day in 0..=horizon_days {
                    let t = day as f64 / horizon_days as f64;
                    p.push(day, 100.0 + (end - 100.0) * t, Regime::Bull);
                }
                p
            })
            .collect();
        SimulationEnsemble {
            initial_capital: 100.0,
            horizon_days,
            base_seed: 0,
            paths,
        }
    }

    #[test]
    fn test_bands_are_ordered_and_start_at_capital() {
        let finals: Vec<f64> = (0..20).map(|i| 80.0 + 3.0 * ((i * 7) % 20) as f64).collect();
        let ensemble = linear_ensemble(&finals, 100);
        let bands = percentile_bands(&ensemble, sample_step(100)).unwrap();

        let first = bands.bands.first().unwrap();
        assert_eq!(first.day, 0);
        assert_eq!(first.values.p10, 100.0);
        assert_eq!(first.values.p90, 100.0);
        assert_eq!(bands.bands.last().unwrap().day, 100);

        for band in &bands.bands {
            let v = band.values;
            assert!(v.p10 <= v.p25 && v.p25 <= v.p50 && v.p50 <= v.p75 && v.p75 <= v.p90);
        }
    }

    #[test]
    fn test_final_band_matches_final_values() {
        let finals = [120.0, 90.0, 105.0, 130.0, 95.0, 110.0, 85.0, 100.0, 125.0, 115.0];
        let ensemble = linear_ensemble(&finals, 10);
        let bands = percentile_bands(&ensemble, 5).unwrap();
        let last = bands.bands.last().unwrap();
        // Sorted finals: 85 90 95 100 105 110 115 120 125 130
        assert_eq!(last.values.p10, 90.0);
        assert_eq!(last.values.p50, 110.0);
        assert_eq!(last.values.p90, 130.0);
    }

    #[test]
    fn test_percentile_paths_point_at_ranked_finals() {
        let finals = [120.0, 90.0, 105.0, 130.0, 95.0, 110.0, 85.0, 100.0, 125.0, 115.0];
        let ensemble = linear_ensemble(&finals, 4);
        let indices = percentile_path_indices(&ensemble, &[0.0, 0.5, 0.9]);
        assert_eq!(indices, vec![(0.0, 6), (0.5, 5), (0.9, 3)]);

        let bands = percentile_bands(&ensemble, 1).unwrap();
        assert_eq!(bands.percentile_paths.len(), BAND_PERCENTILES.len());
    }

    #[test]
    fn test_empty_ensemble() {
        let ensemble = linear_ensemble(&[], 10);
        assert!(percentile_bands(&ensemble, 1).is_none());
        assert!(percentile_path_indices(&ensemble, &[0.5]).is_empty());
    }
}
