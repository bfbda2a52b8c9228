//! Path simulation and the Monte Carlo driver
//!
//! `SimulationContext::prepare` validates a request and builds the batch-level
//! state (asset order, weights, Cholesky factor) once. Every path then owns its
//! own generator and model state; nothing mutable is shared between paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, warn};

use crate::config::{ModelConfig, ScenarioSet, SimulationConfig};
use crate::error::{ConfigError, Result, SimulationError};
use crate::market::random::{innovation, normal};
use crate::market::{
    CholeskyFactor, CorrelationMatrix, GarchVolatility, JumpProcess, MeanReversion,
    RegimeProcess,
};
use crate::model::{AssetParameter, Regime, SimulationEnsemble, SimulationPath};

pub const RECESSION_MULTIPLIER: f64 = 0.7;
pub const BULL_MARKET_MULTIPLIER: f64 = 1.3;
/// Std dev of the random factor in the volatility-spike multiplier
pub const VOLATILITY_SPIKE_STD: f64 = 0.5;

/// Read-only state shared by every path in a batch
#[derive(Debug, Clone)]
pub struct SimulationContext {
    assets: Vec<AssetParameter>,
    weights: Vec<f64>,
    correlation: Option<CorrelationMatrix>,
    cholesky: Option<CholeskyFactor>,
    jumps: Option<JumpProcess>,
    model: ModelConfig,
    initial_capital: f64,
    horizon_days: usize,
}

impl SimulationContext {
    /// Validate `config` and precompute batch-level state
    pub fn prepare(config: &SimulationConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let assets = config
            .holdings
            .iter()
            .map(|h| {
                config
                    .assets
                    .get(&h.ticker)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownTicker(h.ticker.clone()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let weights = config.holdings.iter().map(|h| h.weight).collect();

        let (correlation, cholesky) = if config.model.use_correlation {
            let tickers: Vec<&str> = config.holdings.iter().map(|h| h.ticker.as_str()).collect();
            let matrix = CorrelationMatrix::from_tickers(&tickers);
            let factor = CholeskyFactor::decompose(&matrix);
            (Some(matrix), Some(factor))
        } else {
            (None, None)
        };

        let jumps = if config.model.use_jump_diffusion {
            Some(JumpProcess::new(config.model.jump)?)
        } else {
            None
        };

        Ok(Self {
            assets,
            weights,
            correlation,
            cholesky,
            jumps,
            model: config.model.clone(),
            initial_capital: config.initial_capital,
            horizon_days: config.horizon_days,
        })
    }

    #[must_use]
    pub fn correlation(&self) -> Option<&CorrelationMatrix> {
        self.correlation.as_ref()
    }

    #[must_use]
    pub fn cholesky(&self) -> Option<&CholeskyFactor> {
        self.cholesky.as_ref()
    }

    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }
}

/// Multiply a daily return by each active scenario, in fixed order
fn apply_scenarios<R: Rng + ?Sized>(mut ret: f64, scenarios: &ScenarioSet, rng: &mut R) -> f64 {
    if scenarios.recession {
        ret *= RECESSION_MULTIPLIER;
    }
    if scenarios.volatility_spike {
        ret *= 1.0 + normal(rng, 0.0, VOLATILITY_SPIKE_STD);
    }
    if scenarios.bull_market {
        ret *= BULL_MARKET_MULTIPLIER;
    }
    ret
}

/// Simulate one portfolio trajectory of `horizon_days + 1` points
pub fn simulate_path<R: Rng + ?Sized>(ctx: &SimulationContext, rng: &mut R) -> SimulationPath {
    let model = &ctx.model;
    let n = ctx.assets.len();
    let fat_tails = model.use_fat_tails.then_some(model.degrees_of_freedom);

    // Per-path model state
    let mut garch: Vec<GarchVolatility> = if model.use_garch {
        vec![GarchVolatility::new(model.garch); n]
    } else {
        Vec::new()
    };
    let mut reversion: Vec<MeanReversion> = if model.use_mean_reversion {
        ctx.assets
            .iter()
            .map(|a| {
                MeanReversion::new(a.daily_mean_return, a.daily_volatility, model.mean_reversion_speed)
            })
            .collect()
    } else {
        Vec::new()
    };
    let mut regime = model.use_regime_switching.then(RegimeProcess::new);

    let mut draws = vec![0.0; n];
    let mut innovations = vec![0.0; n];
    let mut prev_returns = vec![0.0; n];

    let mut value = ctx.initial_capital;
    let mut path = SimulationPath::with_capacity(ctx.horizon_days);
    path.push(0, value, Regime::Bull);

    for day in 1..=ctx.horizon_days {
        let today = regime.map_or(Regime::Bull, |r| r.current());

        for d in &mut draws {
            *d = innovation(rng, fat_tails);
        }
        match &ctx.cholesky {
            Some(factor) => factor.apply(&draws, &mut innovations),
            None => innovations.copy_from_slice(&draws),
        }

        let mut daily_return = 0.0;
        for i in 0..n {
            let asset = &ctx.assets[i];
            let mut mean = asset.daily_mean_return;
            let mut vol = asset.daily_volatility;

            if let Some(mr) = reversion.get_mut(i) {
                mean = mr.step(rng);
            }
            if regime.is_some() {
                let (mean_scale, vol_scale) = today.scale();
                mean *= mean_scale;
                vol *= vol_scale;
            }
            if let Some(g) = garch.get_mut(i) {
                vol = g.update(prev_returns[i]);
            }

            let mut ret = innovations[i] * vol + mean;
            if let Some(jumps) = &ctx.jumps {
                ret += jumps.sample(rng);
            }
            ret = apply_scenarios(ret, &model.scenarios, rng);

            prev_returns[i] = ret;
            daily_return += ret * ctx.weights[i];
        }

        value *= 1.0 + daily_return;
        if model.floor_at_zero {
            // NaN also maps to 0
            value = value.max(0.0);
        }

        let recorded = match regime.as_mut() {
            Some(process) => process.transition(rng),
            None => Regime::Bull,
        };
        path.push(day, value, recorded);
    }

    path
}

/// Progress tracking and cooperative cancellation for a Monte Carlo batch
#[derive(Debug, Clone, Default)]
pub struct MonteCarloProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl MonteCarloProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Share existing atomics (e.g. with a UI thread)
    pub fn from_atomics(completed: Arc<AtomicUsize>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            completed,
            cancelled,
        }
    }

    /// Number of finished paths
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    /// Request cancellation; checked between paths
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Run the batch described by `config`
pub fn monte_carlo_simulate(config: &SimulationConfig) -> Result<SimulationEnsemble> {
    monte_carlo_simulate_with_progress(config, &MonteCarloProgress::default())
}

/// Run the batch, reporting completed paths and honoring cancellation
pub fn monte_carlo_simulate_with_progress(
    config: &SimulationConfig,
    progress: &MonteCarloProgress,
) -> Result<SimulationEnsemble> {
    let ctx = SimulationContext::prepare(config)?;
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let num_paths = config.num_simulations;

    debug!(
        assets = ctx.num_assets(),
        horizon_days = ctx.horizon_days,
        num_paths,
        base_seed,
        correlated = ctx.cholesky.is_some(),
        "starting monte carlo batch"
    );

    let run_path = |index: usize| -> Option<SimulationPath> {
        if progress.is_cancelled() {
            return None;
        }
        let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(index as u64));
        let path = simulate_path(&ctx, &mut rng);
        progress.increment();
        Some(path)
    };

    #[cfg(feature = "parallel")]
    let paths: Option<Vec<SimulationPath>> = (0..num_paths).into_par_iter().map(run_path).collect();
    #[cfg(not(feature = "parallel"))]
    let paths: Option<Vec<SimulationPath>> = (0..num_paths).map(run_path).collect();

    let Some(paths) = paths else {
        info!(completed = progress.completed(), "monte carlo batch cancelled");
        return Err(SimulationError::Cancelled);
    };

    let non_finite = paths
        .iter()
        .filter(|p| p.final_value().is_some_and(|v| !v.is_finite()))
        .count();
    if non_finite > 0 {
        warn!(non_finite, num_paths, "paths ended with a non-finite value");
    }

    info!(num_paths, base_seed, "monte carlo batch complete");

    Ok(SimulationEnsemble {
        initial_capital: config.initial_capital,
        horizon_days: config.horizon_days,
        base_seed,
        paths,
    })
}
