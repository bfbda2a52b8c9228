//! Metric records derived from a simulation ensemble
//!
//! All percentages are expressed on a 0-100 scale.

use serde::{Deserialize, Serialize};

/// Final-value percentiles (portfolio value, not returns)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuePercentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// Distribution statistics of ensemble outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub num_paths: usize,
    /// Mean per-path return over the whole horizon (%)
    pub mean_return: f64,
    /// Population standard deviation of per-path returns (%)
    pub return_std_dev: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub skewness: f64,
    /// Non-excess kurtosis (3.0 for a normal distribution)
    pub kurtosis: f64,
    /// 95% Value-at-Risk as a return vs initial capital (%)
    pub var_95: f64,
    /// 99% Value-at-Risk as a return vs initial capital (%)
    pub var_99: f64,
    /// Final portfolio value at the 95% VaR threshold
    pub var_95_value: f64,
    pub var_99_value: f64,
    /// Mean return of the paths at or below the 95% VaR threshold (%)
    pub expected_shortfall: f64,
    pub expected_shortfall_value: f64,
    pub percentiles: ValuePercentiles,
    pub mean_final_value: f64,
    pub min_final_value: f64,
    pub max_final_value: f64,
    /// Share of paths ending below the initial capital (%)
    pub probability_of_loss: f64,
}

/// Likelihood of reaching a target portfolio value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProbability {
    pub target: f64,
    /// Share of paths whose final value is at least `target` (%)
    pub probability: f64,
    /// First day on which at least half the paths are at or above `target`
    pub median_crossing_day: Option<usize>,
}

/// Cross-sectional drawdown statistics on one sampled day (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownCurvePoint {
    pub day: usize,
    pub p10: f64,
    pub median: f64,
    pub p90: f64,
    pub worst: f64,
}

/// Distribution of peak-to-trough declines across paths (%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownProfile {
    pub median_max_drawdown: f64,
    pub p90_max_drawdown: f64,
    pub p95_max_drawdown: f64,
    pub worst_max_drawdown: f64,
    pub average_max_drawdown: f64,
    pub curve: Vec<DrawdownCurvePoint>,
}

/// Cross-sectional value percentiles on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub day: usize,
    pub values: ValuePercentiles,
}

/// Per-day value percentiles plus representative path indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBands {
    pub bands: Vec<BandPoint>,
    /// (percentile as 0-1, index of the path sitting at that final-value rank)
    pub percentile_paths: Vec<(f64, usize)>,
}
