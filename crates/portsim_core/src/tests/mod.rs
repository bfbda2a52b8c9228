//! Scenario tests for the portsim simulation engine
//!
//! Tests are organized by topic:
//! - `paths` - Path shape, reproducibility and model toggles end to end
//! - `correlation` - Correlation matrix and Cholesky factor over realistic baskets
//! - `metrics` - Risk, goal and drawdown metrics on simulated ensembles
//! - `scenarios` - Recession, volatility-spike and bull-market overlays
