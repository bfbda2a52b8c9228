use serde::{Deserialize, Serialize};

use super::{analyze_drawdowns, goal_probability, percentile_bands, risk_metrics, sample_step};
use crate::model::{
    DrawdownProfile, GoalProbability, PercentileBands, RiskMetrics, SimulationEnsemble,
};

/// Every metric for one ensemble, ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleReport {
    pub num_paths: usize,
    pub initial_capital: f64,
    pub horizon_days: usize,
    pub base_seed: u64,
    pub risk: Option<RiskMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalProbability>,
    pub drawdown: Option<DrawdownProfile>,
    pub bands: Option<PercentileBands>,
}

impl EnsembleReport {
    #[must_use]
    pub fn build(ensemble: &SimulationEnsemble, goal_target: Option<f64>) -> Self {
        Self {
            num_paths: ensemble.len(),
            initial_capital: ensemble.initial_capital,
            horizon_days: ensemble.horizon_days,
            base_seed: ensemble.base_seed,
            risk: risk_metrics(ensemble),
            goal: goal_target.and_then(|target| goal_probability(ensemble, target)),
            drawdown: analyze_drawdowns(ensemble),
            bands: percentile_bands(ensemble, sample_step(ensemble.horizon_days)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Regime, SimulationPath};

    fn ensemble(finals: &[f64]) -> SimulationEnsemble {
        let paths = finals
            .iter()
            .map(|&end| {
                let mut p = SimulationPath::with_capacity(2);
                p.push(0, 100.0, Regime::Bull);
                p.push(1, (100.0 + end) / 2.0, Regime::Bull);
                p.push(2, end, Regime::Bull);
                p
            })
            .collect();
        SimulationEnsemble {
            initial_capital: 100.0,
            horizon_days: 2,
            base_seed: 42,
            paths,
        }
    }

    #[test]
    fn test_build_bundles_all_metrics() {
        let report = EnsembleReport::build(&ensemble(&[90.0, 110.0, 120.0]), Some(110.0));
        assert_eq!(report.num_paths, 3);
        assert_eq!(report.base_seed, 42);
        assert_eq!(report.risk.as_ref().unwrap().num_paths, 3);
        assert!((report.goal.as_ref().unwrap().probability - 200.0 / 3.0).abs() < 1e-9);
        assert!(report.drawdown.is_some());
        assert_eq!(report.bands.as_ref().unwrap().bands.len(), 3);
    }

    #[test]
    fn test_goal_is_optional() {
        let report = EnsembleReport::build(&ensemble(&[100.0]), None);
        assert!(report.goal.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("goal").is_none());
        assert!(json.get("risk").is_some());
    }

    #[test]
    fn test_empty_ensemble_has_no_metrics() {
        let report = EnsembleReport::build(&ensemble(&[]), Some(150.0));
        assert_eq!(report.num_paths, 0);
        assert!(report.risk.is_none());
        assert!(report.goal.is_none());
        assert!(report.drawdown.is_none());
        assert!(report.bands.is_none());
    }
}
