//! Side-by-side runs of two holdings sets under one random stream

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::EnsembleReport;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::model::{Holding, RiskMetrics};
use crate::simulation::monte_carlo_simulate;

/// Comparison minus base, in the units of `RiskMetrics`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricDeltas {
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub var_95: f64,
}

impl MetricDeltas {
    #[must_use]
    pub fn between(base: &RiskMetrics, comparison: &RiskMetrics) -> Self {
        Self {
            annualized_return: comparison.annualized_return - base.annualized_return,
            annualized_volatility: comparison.annualized_volatility - base.annualized_volatility,
            sharpe_ratio: comparison.sharpe_ratio - base.sharpe_ratio,
            var_95: comparison.var_95 - base.var_95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioComparison {
    pub base_holdings: Vec<Holding>,
    pub comparison_holdings: Vec<Holding>,
    /// Seed shared by both runs
    pub seed: u64,
    pub base: EnsembleReport,
    pub comparison: EnsembleReport,
    pub deltas: Option<MetricDeltas>,
}

/// Simulate `config` and the same request with `comparison_holdings`.
///
/// Both batches use one base seed (the configured one, or a fresh draw), so
/// path `i` of each run sees the same random stream.
pub fn compare_portfolios(
    config: &SimulationConfig,
    comparison_holdings: Vec<Holding>,
    goal_target: Option<f64>,
) -> Result<PortfolioComparison> {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let base_config = SimulationConfig {
        seed: Some(seed),
        ..config.clone()
    };
    let comparison_config = SimulationConfig {
        seed: Some(seed),
        ..config.with_holdings(comparison_holdings.clone())
    };

    let base = EnsembleReport::build(&monte_carlo_simulate(&base_config)?, goal_target);
    let comparison = EnsembleReport::build(&monte_carlo_simulate(&comparison_config)?, goal_target);

    let deltas = match (&base.risk, &comparison.risk) {
        (Some(b), Some(c)) => Some(MetricDeltas::between(b, c)),
        _ => None,
    };
    if let Some(d) = &deltas {
        info!(
            seed,
            return_delta = d.annualized_return,
            volatility_delta = d.annualized_volatility,
            "portfolio comparison complete"
        );
    }

    Ok(PortfolioComparison {
        base_holdings: config.holdings.clone(),
        comparison_holdings,
        seed,
        base,
        comparison,
        deltas,
    })
}
