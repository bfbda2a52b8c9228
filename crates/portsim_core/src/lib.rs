//! Monte Carlo portfolio simulation library
//!
//! This crate simulates daily portfolio value paths and derives risk analytics
//! from the resulting ensembles. The return model supports:
//! - Correlated asset returns via a Cholesky factor of a heuristic correlation matrix
//! - Fat-tailed (Student-t) innovations
//! - GARCH(1,1) volatility clustering
//! - Bull/bear regime switching
//! - Merton jumps and optional Ornstein-Uhlenbeck mean reversion
//! - Recession, volatility-spike and bull-market scenario overlays
//!
//! Ensembles feed the analysis layer: VaR / Expected Shortfall, Sharpe and
//! higher moments, goal probability, drawdown distributions and percentile bands.
//!
//! # Builder DSL
//!
//! ```ignore
//! use portsim_core::{SimulationBuilder, monte_carlo_simulate, EnsembleReport};
//!
//! let config = SimulationBuilder::new()
//!     .holding("SPY", 0.6)
//!     .holding("BND", 0.4)
//!     .capital(10_000.0)
//!     .years(1)
//!     .simulations(1_000)
//!     .seed(42)
//!     .build();
//!
//! let ensemble = monte_carlo_simulate(&config)?;
//! let report = EnsembleReport::build(&ensemble, Some(12_000.0));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod comparison;
pub mod error;
pub mod market;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::EnsembleReport;
pub use comparison::{PortfolioComparison, compare_portfolios};
pub use config::{ModelConfig, SimulationBuilder, SimulationConfig};
pub use error::{ConfigError, SimulationError};
pub use simulation::{MonteCarloProgress, monte_carlo_simulate, monte_carlo_simulate_with_progress};
