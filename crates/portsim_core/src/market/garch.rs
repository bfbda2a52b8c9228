//! GARCH(1,1) conditional volatility
//!
//! variance_t = omega + alpha * shock_{t-1}^2 + beta * variance_{t-1}

use crate::config::GarchParams;

/// Variance every path starts from
pub const INITIAL_VARIANCE: f64 = 1e-4;

/// Per-asset, per-path variance state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchVolatility {
    params: GarchParams,
    variance: f64,
}

impl GarchVolatility {
    #[must_use]
    pub fn new(params: GarchParams) -> Self {
        Self {
            params,
            variance: INITIAL_VARIANCE,
        }
    }

    /// Fold in the previous realized shock and return the new volatility
    pub fn update(&mut self, shock: f64) -> f64 {
        let GarchParams { omega, alpha, beta } = self.params;
        self.variance = omega + alpha * shock * shock + beta * self.variance;
        self.variance.sqrt()
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Unconditional variance omega / (1 - alpha - beta), if stationary
    #[must_use]
    pub fn long_run_variance(&self) -> Option<f64> {
        let persistence = self.params.alpha + self.params.beta;
        (persistence < 1.0).then(|| self.params.omega / (1.0 - persistence))
    }
}
