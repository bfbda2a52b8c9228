//! Ornstein-Uhlenbeck drift: an asset's daily mean wanders around its
//! long-run value and is pulled back at `speed`.

use rand::Rng;

use super::random::standard_normal;

/// Scale of the drift noise relative to the asset's volatility
const NOISE_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanReversion {
    long_run_mean: f64,
    volatility: f64,
    speed: f64,
    state: f64,
}

impl MeanReversion {
    #[must_use]
    pub fn new(long_run_mean: f64, volatility: f64, speed: f64) -> Self {
        Self {
            long_run_mean,
            volatility,
            speed,
            state: long_run_mean,
        }
    }

    /// Advance one day and return the drift to use in place of the static mean
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.state += self.speed * (self.long_run_mean - self.state)
            + self.volatility * NOISE_SCALE * standard_normal(rng);
        self.state
    }

    #[must_use]
    pub fn state(&self) -> f64 {
        self.state
    }
}
