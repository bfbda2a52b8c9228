use std::fmt;

/// Errors raised while validating a simulation request.
///
/// These are always reported before any path is simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoHoldings,
    NonPositiveCapital(f64),
    ZeroHorizon,
    ZeroSimulations,
    InvalidWeight {
        ticker: String,
        weight: f64,
    },
    UnknownTicker(String),
    InvalidModelParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoHoldings => write!(f, "portfolio has no holdings"),
            ConfigError::NonPositiveCapital(capital) => {
                write!(f, "initial capital must be positive and finite (got {capital})")
            }
            ConfigError::ZeroHorizon => write!(f, "horizon must be at least one trading day"),
            ConfigError::ZeroSimulations => {
                write!(f, "number of simulations must be at least one")
            }
            ConfigError::InvalidWeight { ticker, weight } => {
                write!(f, "weight {weight} for {ticker} is outside [0, 1]")
            }
            ConfigError::UnknownTicker(ticker) => {
                write!(f, "no asset parameters available for ticker {ticker}")
            }
            ConfigError::InvalidModelParameter {
                parameter,
                value,
                reason,
            } => write!(f, "invalid {parameter} ({value}): {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors returned by the Monte Carlo engine
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    /// Monte Carlo simulation was cancelled by user request
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "configuration error: {e}"),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Cancelled => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
