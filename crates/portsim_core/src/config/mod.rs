//! Simulation configuration
//!
//! `SimulationConfig` holds everything needed to run a Monte Carlo batch:
//! the portfolio, the per-ticker parameters, the run size and the model
//! toggles in `ModelConfig`.
//!
//! # Builder DSL
//!
//! ```ignore
//! use portsim_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .holding("SPY", 0.6)
//!     .holding("BND", 0.4)
//!     .capital(10_000.0)
//!     .years(1)
//!     .simulations(1_000)
//!     .seed(42)
//!     .recession()
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{AssetTable, Holding};

pub mod builder;

pub use builder::SimulationBuilder;

/// Trading days per year, used for horizon and annualization math
pub const TRADING_DAYS_PER_YEAR: usize = 252;

fn default_num_simulations() -> usize {
    1_000
}

fn default_horizon_days() -> usize {
    TRADING_DAYS_PER_YEAR
}

/// GARCH(1,1) coefficients: variance = omega + alpha * shock^2 + beta * variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarchParams {
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
}

impl Default for GarchParams {
    fn default() -> Self {
        Self {
            omega: 1e-6,
            alpha: 0.1,
            beta: 0.85,
        }
    }
}

/// Merton jump parameters (daily)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpParams {
    /// Probability of a jump on any given day
    pub intensity: f64,
    pub mean: f64,
    pub volatility: f64,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            intensity: 0.01,
            mean: -0.015,
            volatility: 0.025,
        }
    }
}

/// Stress scenarios applied to every asset's daily return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSet {
    /// Scale returns by 0.7
    pub recession: bool,
    /// Scale returns by (1 + N(0, 0.5))
    pub volatility_spike: bool,
    /// Scale returns by 1.3
    pub bull_market: bool,
}

impl ScenarioSet {
    #[must_use]
    pub fn any(&self) -> bool {
        self.recession || self.volatility_spike || self.bull_market
    }
}

/// Independently togglable model features
///
/// Every feature is on by default except mean reversion, the stress
/// scenarios and `floor_at_zero`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub use_correlation: bool,
    pub use_fat_tails: bool,
    /// Student-t degrees of freedom for fat-tailed draws
    pub degrees_of_freedom: u32,
    pub use_garch: bool,
    pub garch: GarchParams,
    pub use_regime_switching: bool,
    pub use_jump_diffusion: bool,
    pub jump: JumpParams,
    pub use_mean_reversion: bool,
    pub mean_reversion_speed: f64,
    pub scenarios: ScenarioSet,
    /// Clamp the portfolio value at zero after each day
    pub floor_at_zero: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            use_correlation: true,
            use_fat_tails: true,
            degrees_of_freedom: 5,
            use_garch: true,
            garch: GarchParams::default(),
            use_regime_switching: true,
            use_jump_diffusion: true,
            jump: JumpParams::default(),
            use_mean_reversion: false,
            mean_reversion_speed: 0.05,
            scenarios: ScenarioSet::default(),
            floor_at_zero: false,
        }
    }
}

impl ModelConfig {
    /// Independent Gaussian random walk with every optional feature off
    #[must_use]
    pub fn gaussian() -> Self {
        Self {
            use_correlation: false,
            use_fat_tails: false,
            use_garch: false,
            use_regime_switching: false,
            use_jump_diffusion: false,
            use_mean_reversion: false,
            ..Self::default()
        }
    }

    /// Check parameters of enabled features
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_fat_tails && self.degrees_of_freedom < 1 {
            return Err(ConfigError::InvalidModelParameter {
                parameter: "degrees of freedom",
                value: f64::from(self.degrees_of_freedom),
                reason: "must be at least 1",
            });
        }

        if self.use_garch {
            let GarchParams { omega, alpha, beta } = self.garch;
            let coefficients = [
                ("GARCH omega", omega),
                ("GARCH alpha", alpha),
                ("GARCH beta", beta),
            ];
            for (parameter, value) in coefficients {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidModelParameter {
                        parameter,
                        value,
                        reason: "must be non-negative and finite",
                    });
                }
            }
        }

        if self.use_jump_diffusion {
            let JumpParams {
                intensity,
                mean,
                volatility,
            } = self.jump;
            if !(0.0..=1.0).contains(&intensity) {
                return Err(ConfigError::InvalidModelParameter {
                    parameter: "jump intensity",
                    value: intensity,
                    reason: "must be a probability in [0, 1]",
                });
            }
            if !mean.is_finite() {
                return Err(ConfigError::InvalidModelParameter {
                    parameter: "jump mean",
                    value: mean,
                    reason: "must be finite",
                });
            }
            if !volatility.is_finite() || volatility < 0.0 {
                return Err(ConfigError::InvalidModelParameter {
                    parameter: "jump volatility",
                    value: volatility,
                    reason: "must be non-negative and finite",
                });
            }
        }

        if self.use_mean_reversion
            && (!self.mean_reversion_speed.is_finite() || self.mean_reversion_speed < 0.0)
        {
            return Err(ConfigError::InvalidModelParameter {
                parameter: "mean reversion speed",
                value: self.mean_reversion_speed,
                reason: "must be non-negative and finite",
            });
        }

        Ok(())
    }
}

/// Complete Monte Carlo request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub holdings: Vec<Holding>,
    #[serde(default = "AssetTable::fallback")]
    pub assets: AssetTable,
    pub initial_capital: f64,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,
    #[serde(default)]
    pub model: ModelConfig,
    /// Base seed; path `i` uses `seed + i`. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            holdings: Vec::new(),
            assets: AssetTable::fallback(),
            initial_capital: 10_000.0,
            horizon_days: default_horizon_days(),
            num_simulations: default_num_simulations(),
            model: ModelConfig::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reject requests the engine cannot run. Called before any path is simulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.holdings.is_empty() {
            return Err(ConfigError::NoHoldings);
        }
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if self.horizon_days == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.num_simulations == 0 {
            return Err(ConfigError::ZeroSimulations);
        }

        for holding in &self.holdings {
            if !(0.0..=1.0).contains(&holding.weight) {
                return Err(ConfigError::InvalidWeight {
                    ticker: holding.ticker.clone(),
                    weight: holding.weight,
                });
            }
            if !self.assets.contains(&holding.ticker) {
                return Err(ConfigError::UnknownTicker(holding.ticker.clone()));
            }
        }

        self.model.validate()
    }

    /// Same request with a different portfolio
    #[must_use]
    pub fn with_holdings(&self, holdings: Vec<Holding>) -> Self {
        Self {
            holdings,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}
