//! YAML run files
//!
//! A run file describes one simulation request:
//!
//! ```yaml
//! holdings:
//!   - ticker: SPY
//!     weight: 0.6
//!   - ticker: BND
//!     weight: 0.4
//! initial_capital: 10000.0
//! horizon_days: 252
//! num_simulations: 1000
//! seed: 42
//! goal_target: 12000.0
//! model:
//!   use_jump_diffusion: false
//!   scenarios:
//!     recession: true
//! assets:
//!   - ticker: SPY
//!     daily_mean_return: 0.0005
//!     daily_volatility: 0.011
//! compare_holdings:
//!   - ticker: BND
//!     weight: 1.0
//! ```
//!
//! Everything except `holdings` has a default. `assets` entries are merged
//! over the built-in fallback table.

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use portsim_core::config::{ModelConfig, SimulationConfig, TRADING_DAYS_PER_YEAR};
use portsim_core::model::{AssetParameter, AssetTable, Holding};
use serde::{Deserialize, Serialize};

fn default_initial_capital() -> f64 {
    10_000.0
}

fn default_horizon_days() -> usize {
    TRADING_DAYS_PER_YEAR
}

fn default_num_simulations() -> usize {
    1_000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    pub holdings: Vec<Holding>,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<f64>,
    #[serde(default)]
    pub model: ModelConfig,
    /// Per-ticker parameters layered over the fallback table
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<AssetParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_holdings: Option<Vec<Holding>>,
}

/// Command-line values that take precedence over the run file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    pub num_simulations: Option<usize>,
    pub seed: Option<u64>,
    pub goal_target: Option<f64>,
    pub compare_holdings: Option<Vec<Holding>>,
}

impl RunFile {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Read and parse a run file from disk
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read run file {}", path.display()))?;
        let run = Self::from_yaml(&content)
            .wrap_err_with(|| format!("failed to parse run file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            holdings = run.holdings.len(),
            "loaded run file"
        );
        Ok(run)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: RunOverrides) -> Self {
        if let Some(n) = overrides.num_simulations {
            self.num_simulations = n;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.goal_target.is_some() {
            self.goal_target = overrides.goal_target;
        }
        if overrides.compare_holdings.is_some() {
            self.compare_holdings = overrides.compare_holdings;
        }
        self
    }

    /// Engine request for the base holdings
    #[must_use]
    pub fn to_config(&self) -> SimulationConfig {
        let mut assets = AssetTable::fallback();
        assets.merge(AssetTable::from(self.assets.clone()));

        SimulationConfig {
            holdings: self.holdings.clone(),
            assets,
            initial_capital: self.initial_capital,
            horizon_days: self.horizon_days,
            num_simulations: self.num_simulations,
            model: self.model.clone(),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MINIMAL: &str = "holdings:\n  - ticker: SPY\n    weight: 1.0\n";

    #[test]
    fn test_minimal_run_file_uses_defaults() {
        let run = RunFile::from_yaml(MINIMAL).unwrap();
        assert_eq!(run.holdings, vec![Holding::new("SPY", 1.0)]);
        assert_eq!(run.initial_capital, 10_000.0);
        assert_eq!(run.horizon_days, 252);
        assert_eq!(run.num_simulations, 1_000);
        assert_eq!(run.seed, None);
        assert_eq!(run.model, ModelConfig::default());
        assert!(run.compare_holdings.is_none());
    }

    #[test]
    fn test_full_run_file() {
        let yaml = r#"
holdings:
  - ticker: SPY
    weight: 0.6
  - ticker: BND
    weight: 0.4
initial_capital: 50000.0
horizon_days: 504
num_simulations: 250
seed: 7
goal_target: 60000.0
model:
  use_jump_diffusion: false
  degrees_of_freedom: 4
  scenarios:
    recession: true
assets:
  - ticker: spy
    daily_mean_return: 0.0005
    daily_volatility: 0.011
  - ticker: XYZ
    daily_mean_return: 0.001
    daily_volatility: 0.02
compare_holdings:
  - ticker: BND
    weight: 1.0
"#;
        let run = RunFile::from_yaml(yaml).unwrap();
        assert_eq!(run.initial_capital, 50_000.0);
        assert_eq!(run.seed, Some(7));
        assert_eq!(run.goal_target, Some(60_000.0));
        assert!(!run.model.use_jump_diffusion);
        assert!(run.model.use_garch);
        assert_eq!(run.model.degrees_of_freedom, 4);
        assert!(run.model.scenarios.recession);
        assert_eq!(run.compare_holdings, Some(vec![Holding::new("BND", 1.0)]));

        let config = run.to_config();
        assert_eq!(config.horizon_days, 504);
        assert_eq!(config.num_simulations, 250);
        // Overrides replace fallback entries; new tickers are added
        assert_eq!(config.assets.get("SPY").unwrap().daily_mean_return, 0.0005);
        assert!(config.assets.contains("XYZ"));
        assert!(config.assets.contains("QQQ"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_holdings_is_an_error() {
        assert!(RunFile::from_yaml("initial_capital: 100.0\n").is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let run = RunFile::from_yaml(MINIMAL).unwrap().with_overrides(RunOverrides {
            num_simulations: Some(10),
            seed: Some(3),
            goal_target: None,
            compare_holdings: Some(vec![Holding::new("BND", 1.0)]),
        });
        assert_eq!(run.num_simulations, 10);
        assert_eq!(run.seed, Some(3));
        assert_eq!(run.goal_target, None);
        assert!(run.compare_holdings.is_some());

        // Absent overrides keep file values
        let kept = run.clone().with_overrides(RunOverrides::default());
        assert_eq!(kept, run);
    }

    #[test]
    fn test_demo_run_files_are_valid() {
        for yaml in [
            include_str!("../../../demos/sixty_forty.yaml"),
            include_str!("../../../demos/tech_tilt.yaml"),
        ] {
            let run = RunFile::from_yaml(yaml).unwrap();
            assert_eq!(run.to_config().validate(), Ok(()));
        }
    }

    #[test]
    fn test_compare_demo_only_sets_holdings() {
        let run = RunFile::from_yaml(include_str!("../../../demos/tech_tilt.yaml")).unwrap();
        assert_eq!(run.holdings.len(), 3);
        assert_eq!(run.model, ModelConfig::default());
        assert!(run.assets.is_empty());
        assert!(run.compare_holdings.is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        fs::write(&path, MINIMAL).unwrap();

        let run = RunFile::load(&path).unwrap();
        assert_eq!(run.holdings.len(), 1);

        let err = RunFile::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(format!("{err}").contains("failed to read run file"));
    }
}
