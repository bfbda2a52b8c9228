//! Executes a run file and renders the result

use color_eyre::eyre::WrapErr;
use portsim_core::{
    EnsembleReport, PortfolioComparison, compare_portfolios, monte_carlo_simulate,
};
use serde::Serialize;
use tracing::info;

use crate::run_file::RunFile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutput {
    Report(EnsembleReport),
    Comparison(PortfolioComparison),
}

/// Simulate the run file's portfolio, or both portfolios when a comparison
/// is requested
pub fn execute(run: &RunFile) -> color_eyre::Result<RunOutput> {
    let config = run.to_config();
    info!(
        holdings = config.holdings.len(),
        num_simulations = config.num_simulations,
        horizon_days = config.horizon_days,
        compare = run.compare_holdings.is_some(),
        "running simulation"
    );

    match &run.compare_holdings {
        Some(comparison) => compare_portfolios(&config, comparison.clone(), run.goal_target)
            .map(RunOutput::Comparison)
            .wrap_err("portfolio comparison failed"),
        None => {
            let ensemble = monte_carlo_simulate(&config).wrap_err("simulation failed")?;
            Ok(RunOutput::Report(EnsembleReport::build(
                &ensemble,
                run.goal_target,
            )))
        }
    }
}

pub fn to_json(output: &RunOutput) -> color_eyre::Result<String> {
    serde_json::to_string_pretty(output).wrap_err("failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use portsim_core::model::Holding;

    fn small_run() -> RunFile {
        RunFile::from_yaml(
            "holdings:\n  - ticker: SPY\n    weight: 0.6\n  - ticker: BND\n    weight: 0.4\n\
             horizon_days: 21\nnum_simulations: 50\nseed: 9\ngoal_target: 10100.0\n",
        )
        .unwrap()
    }

    #[test]
    fn test_single_run_produces_report() {
        let output = execute(&small_run()).unwrap();
        let RunOutput::Report(report) = &output else {
            panic!("expected a single report");
        };
        assert_eq!(report.num_paths, 50);
        assert_eq!(report.base_seed, 9);
        assert!(report.goal.is_some());

        let json: serde_json::Value = serde_json::from_str(&to_json(&output).unwrap()).unwrap();
        assert_eq!(json["kind"], "report");
        assert_eq!(json["num_paths"], 50);
        assert!(json["risk"]["var_95"].is_number());
    }

    #[test]
    fn test_comparison_run() {
        let run = RunFile {
            compare_holdings: Some(vec![Holding::new("BND", 1.0)]),
            ..small_run()
        };
        let output = execute(&run).unwrap();
        let RunOutput::Comparison(comparison) = &output else {
            panic!("expected a comparison");
        };
        assert_eq!(comparison.seed, 9);
        assert!(comparison.deltas.is_some());

        let json: serde_json::Value = serde_json::from_str(&to_json(&output).unwrap()).unwrap();
        assert_eq!(json["kind"], "comparison");
        assert!(json["deltas"]["sharpe_ratio"].is_number());
    }

    #[test]
    fn test_invalid_run_reports_cause() {
        let run = RunFile {
            holdings: vec![Holding::new("NOPE", 1.0)],
            ..small_run()
        };
        let err = execute(&run).unwrap_err();
        assert_eq!(format!("{err}"), "simulation failed");
        assert!(format!("{err:?}").contains("NOPE"));
    }
}
