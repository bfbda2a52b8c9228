//! Distribution statistics, Value-at-Risk and Expected Shortfall

use super::{percentile_of_sorted, sorted};
use crate::config::TRADING_DAYS_PER_YEAR;
use crate::model::{RiskMetrics, SimulationEnsemble, ValuePercentiles};

/// Risk metrics for an ensemble, using its own capital and horizon
#[must_use]
pub fn risk_metrics(ensemble: &SimulationEnsemble) -> Option<RiskMetrics> {
    compute_risk_metrics(
        &ensemble.final_values(),
        ensemble.initial_capital,
        ensemble.horizon_days,
    )
}

/// Risk metrics from raw final values. `None` when `final_values` is empty.
#[must_use]
pub fn compute_risk_metrics(
    final_values: &[f64],
    initial_capital: f64,
    horizon_days: usize,
) -> Option<RiskMetrics> {
    if final_values.is_empty() {
        return None;
    }

    let finals = sorted(final_values.to_vec());
    let n = finals.len() as f64;
    let to_return = |value: f64| (value - initial_capital) / initial_capital;

    let returns: Vec<f64> = finals.iter().map(|&v| to_return(v)).collect();
    let mean = returns.iter().sum::<f64>() / n;
    let central_moment = |k: i32| returns.iter().map(|r| (r - mean).powi(k)).sum::<f64>() / n;
    let variance = central_moment(2);
    let std_dev = variance.sqrt();

    let (skewness, kurtosis) = if std_dev.is_finite() && std_dev > 0.0 {
        (
            central_moment(3) / std_dev.powi(3),
            central_moment(4) / std_dev.powi(4),
        )
    } else {
        (0.0, 0.0)
    };

    let years = (horizon_days as f64 / TRADING_DAYS_PER_YEAR as f64).max(1.0);
    // Losses beyond the whole capital annualize to -100%
    let growth = 1.0 + mean;
    let annualized_return = if growth < 0.0 {
        -1.0
    } else {
        growth.powf(1.0 / years) - 1.0
    };
    let annualized_volatility = std_dev / years.sqrt();
    let sharpe_ratio = if annualized_volatility.is_finite()
        && annualized_volatility > 0.0
        && annualized_return.is_finite()
    {
        annualized_return / annualized_volatility
    } else {
        0.0
    };

    let var_95_value = percentile_of_sorted(&finals, 0.05);
    let var_99_value = percentile_of_sorted(&finals, 0.01);

    let tail: Vec<f64> = finals.iter().copied().filter(|&v| v <= var_95_value).collect();
    let expected_shortfall_value = if tail.is_empty() {
        var_95_value
    } else {
        tail.iter().sum::<f64>() / tail.len() as f64
    };

    let losses = finals.iter().filter(|&&v| v < initial_capital).count();

    Some(RiskMetrics {
        num_paths: finals.len(),
        mean_return: mean * 100.0,
        return_std_dev: std_dev * 100.0,
        annualized_return: annualized_return * 100.0,
        annualized_volatility: annualized_volatility * 100.0,
        sharpe_ratio,
        skewness,
        kurtosis,
        var_95: to_return(var_95_value) * 100.0,
        var_99: to_return(var_99_value) * 100.0,
        var_95_value,
        var_99_value,
        expected_shortfall: to_return(expected_shortfall_value) * 100.0,
        expected_shortfall_value,
        percentiles: ValuePercentiles {
            p10: percentile_of_sorted(&finals, 0.10),
            p25: percentile_of_sorted(&finals, 0.25),
            p50: percentile_of_sorted(&finals, 0.50),
            p75: percentile_of_sorted(&finals, 0.75),
            p90: percentile_of_sorted(&finals, 0.90),
        },
        mean_final_value: finals.iter().sum::<f64>() / n,
        min_final_value: finals[0],
        max_final_value: finals[finals.len() - 1],
        probability_of_loss: losses as f64 / n * 100.0,
    })
}
