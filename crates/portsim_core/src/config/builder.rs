//! Simulation Builder
//!
//! Fluent API for assembling a `SimulationConfig`. Validation is deferred to
//! the engine, which checks the request before simulating any path.
//!
//! # Example
//!
//! ```ignore
//! use portsim_core::config::SimulationBuilder;
//! use portsim_core::model::AssetParameter;
//!
//! let config = SimulationBuilder::new()
//!     .holding("SPY", 0.5)
//!     .holding("QQQ", 0.3)
//!     .holding("BND", 0.2)
//!
//!     // Override the fallback table with live parameters
//!     .asset(AssetParameter::new("QQQ", 0.0007, 0.015))
//!
//!     .capital(25_000.0)
//!     .years(5)
//!     .simulations(5_000)
//!     .without_jumps()
//!     .volatility_spike()
//!     .build();
//! ```

use super::{GarchParams, JumpParams, ModelConfig, SimulationConfig, TRADING_DAYS_PER_YEAR};
use crate::model::{AssetParameter, AssetTable, Holding};

/// Builder for Monte Carlo requests
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    config: SimulationConfig,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a builder over the fallback asset table and default model
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    // =========================================================================
    // Portfolio
    // =========================================================================

    /// Add a holding
    #[must_use]
    pub fn holding(mut self, ticker: &str, weight: f64) -> Self {
        self.config.holdings.push(Holding::new(ticker, weight));
        self
    }

    /// Replace all holdings
    #[must_use]
    pub fn holdings(mut self, holdings: Vec<Holding>) -> Self {
        self.config.holdings = holdings;
        self
    }

    /// Add or override parameters for one ticker
    #[must_use]
    pub fn asset(mut self, asset: AssetParameter) -> Self {
        self.config.assets.insert(asset);
        self
    }

    /// Replace the whole asset table
    #[must_use]
    pub fn assets(mut self, assets: AssetTable) -> Self {
        self.config.assets = assets;
        self
    }

    // =========================================================================
    // Run size
    // =========================================================================

    #[must_use]
    pub fn capital(mut self, initial_capital: f64) -> Self {
        self.config.initial_capital = initial_capital;
        self
    }

    #[must_use]
    pub fn horizon_days(mut self, days: usize) -> Self {
        self.config.horizon_days = days;
        self
    }

    /// Horizon in years of 252 trading days
    #[must_use]
    pub fn years(self, years: usize) -> Self {
        self.horizon_days(years * TRADING_DAYS_PER_YEAR)
    }

    #[must_use]
    pub fn simulations(mut self, num_simulations: usize) -> Self {
        self.config.num_simulations = num_simulations;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    // =========================================================================
    // Model toggles
    // =========================================================================

    /// Replace the whole model configuration
    #[must_use]
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    #[must_use]
    pub fn without_correlation(mut self) -> Self {
        self.config.model.use_correlation = false;
        self
    }

    #[must_use]
    pub fn without_fat_tails(mut self) -> Self {
        self.config.model.use_fat_tails = false;
        self
    }

    #[must_use]
    pub fn fat_tails(mut self, degrees_of_freedom: u32) -> Self {
        self.config.model.use_fat_tails = true;
        self.config.model.degrees_of_freedom = degrees_of_freedom;
        self
    }

    #[must_use]
    pub fn without_garch(mut self) -> Self {
        self.config.model.use_garch = false;
        self
    }

    #[must_use]
    pub fn garch(mut self, omega: f64, alpha: f64, beta: f64) -> Self {
        self.config.model.use_garch = true;
        self.config.model.garch = GarchParams { omega, alpha, beta };
        self
    }

    #[must_use]
    pub fn without_regime_switching(mut self) -> Self {
        self.config.model.use_regime_switching = false;
        self
    }

    #[must_use]
    pub fn without_jumps(mut self) -> Self {
        self.config.model.use_jump_diffusion = false;
        self
    }

    #[must_use]
    pub fn jumps(mut self, intensity: f64, mean: f64, volatility: f64) -> Self {
        self.config.model.use_jump_diffusion = true;
        self.config.model.jump = JumpParams {
            intensity,
            mean,
            volatility,
        };
        self
    }

    #[must_use]
    pub fn mean_reversion(mut self, speed: f64) -> Self {
        self.config.model.use_mean_reversion = true;
        self.config.model.mean_reversion_speed = speed;
        self
    }

    /// Clamp the portfolio value at zero after each simulated day
    #[must_use]
    pub fn floor_at_zero(mut self) -> Self {
        self.config.model.floor_at_zero = true;
        self
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[must_use]
    pub fn recession(mut self) -> Self {
        self.config.model.scenarios.recession = true;
        self
    }

    #[must_use]
    pub fn volatility_spike(mut self) -> Self {
        self.config.model.scenarios.volatility_spike = true;
        self
    }

    #[must_use]
    pub fn bull_market(mut self) -> Self {
        self.config.model.scenarios.bull_market = true;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> SimulationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_portfolio_and_run_size() {
        let config = SimulationBuilder::new()
            .holding("SPY", 0.6)
            .holding("BND", 0.4)
            .capital(50_000.0)
            .years(2)
            .simulations(250)
            .seed(7)
            .build();

        assert_eq!(config.holdings.len(), 2);
        assert_eq!(config.initial_capital, 50_000.0);
        assert_eq!(config.horizon_days, 504);
        assert_eq!(config.num_simulations, 250);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_toggles() {
        let config = SimulationBuilder::new()
            .holding("SPY", 1.0)
            .without_correlation()
            .without_garch()
            .without_jumps()
            .fat_tails(3)
            .mean_reversion(0.1)
            .recession()
            .bull_market()
            .floor_at_zero()
            .build();

        let model = &config.model;
        assert!(!model.use_correlation);
        assert!(!model.use_garch);
        assert!(!model.use_jump_diffusion);
        assert!(model.use_regime_switching);
        assert_eq!(model.degrees_of_freedom, 3);
        assert!(model.use_mean_reversion);
        assert_eq!(model.mean_reversion_speed, 0.1);
        assert!(model.scenarios.recession);
        assert!(!model.scenarios.volatility_spike);
        assert!(model.scenarios.bull_market);
        assert!(model.floor_at_zero);
    }

    #[test]
    fn test_builder_asset_override() {
        let config = SimulationBuilder::new()
            .holding("ACME", 1.0)
            .asset(AssetParameter::new("ACME", 0.001, 0.02))
            .build();
        assert!(config.validate().is_ok());
        assert_eq!(config.assets.get("acme").unwrap().daily_volatility, 0.02);
    }
}
