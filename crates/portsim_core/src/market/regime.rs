//! Two-state Markov regime process (bull / bear)

use rand::Rng;

use crate::model::Regime;

pub const BULL_TO_BEAR: f64 = 0.05;
pub const BEAR_TO_BULL: f64 = 0.10;

/// Daily drift and volatility each regime is calibrated to
pub const BULL_MEAN: f64 = 0.0006;
pub const BULL_VOL: f64 = 0.01;
pub const BEAR_MEAN: f64 = -0.0003;
pub const BEAR_VOL: f64 = 0.025;

/// Reference drift and volatility the regime scale factors are relative to
const REFERENCE_MEAN: f64 = 0.0003;
const REFERENCE_VOL: f64 = 0.01;

impl Regime {
    /// (mean multiplier, volatility multiplier) applied to an asset's parameters
    #[must_use]
    pub fn scale(self) -> (f64, f64) {
        match self {
            Regime::Bull => (BULL_MEAN / REFERENCE_MEAN, BULL_VOL / REFERENCE_VOL),
            Regime::Bear => (BEAR_MEAN / REFERENCE_MEAN, BEAR_VOL / REFERENCE_VOL),
        }
    }

    /// Probability of leaving this regime on any given day
    #[must_use]
    pub fn exit_probability(self) -> f64 {
        match self {
            Regime::Bull => BULL_TO_BEAR,
            Regime::Bear => BEAR_TO_BULL,
        }
    }

    #[must_use]
    pub fn other(self) -> Regime {
        match self {
            Regime::Bull => Regime::Bear,
            Regime::Bear => Regime::Bull,
        }
    }
}

/// Regime state for one path; starts in a bull market
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegimeProcess {
    current: Regime,
}

impl RegimeProcess {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Regime {
        self.current
    }

    /// Advance one day. Consumes one uniform.
    pub fn transition<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Regime {
        if rng.random::<f64>() < self.current.exit_probability() {
            self.current = self.current.other();
        }
        self.current
    }
}
