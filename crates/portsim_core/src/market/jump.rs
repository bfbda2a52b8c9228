//! Merton compound jumps added to daily returns

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use super::random::normal;
use crate::config::JumpParams;
use crate::error::ConfigError;

/// Daily jump generator, built once per batch and shared by every path
#[derive(Debug, Clone, Copy)]
pub struct JumpProcess {
    occurs: Bernoulli,
    mean: f64,
    volatility: f64,
}

impl JumpProcess {
    pub fn new(params: JumpParams) -> Result<Self, ConfigError> {
        let occurs =
            Bernoulli::new(params.intensity).map_err(|_| ConfigError::InvalidModelParameter {
                parameter: "jump intensity",
                value: params.intensity,
                reason: "must be a probability in [0, 1]",
            })?;
        Ok(Self {
            occurs,
            mean: params.mean,
            volatility: params.volatility,
        })
    }

    /// Jump contribution to one asset's return today (0 when no jump fires)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.occurs.sample(rng) {
            normal(rng, self.mean, self.volatility)
        } else {
            0.0
        }
    }
}
