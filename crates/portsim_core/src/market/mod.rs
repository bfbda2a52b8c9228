//! Stochastic building blocks for path simulation
//!
//! - `random` - Box-Muller normals and Student-t draws
//! - `correlation` - Heuristic correlation matrix from ticker classes
//! - `cholesky` - Factorization used to correlate draws
//! - `garch` - GARCH(1,1) volatility
//! - `regime` - Bull/bear Markov regimes
//! - `jump` - Merton jumps
//! - `mean_reversion` - Ornstein-Uhlenbeck drift

pub mod cholesky;
pub mod correlation;
pub mod garch;
pub mod jump;
pub mod mean_reversion;
pub mod random;
pub mod regime;

pub use cholesky::CholeskyFactor;
pub use correlation::CorrelationMatrix;
pub use garch::GarchVolatility;
pub use jump::JumpProcess;
pub use mean_reversion::MeanReversion;
pub use regime::RegimeProcess;
