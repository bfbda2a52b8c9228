//! Simulated trajectories

use serde::{Deserialize, Serialize};

/// Market regime active on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Regime {
    #[default]
    Bull,
    Bear,
}

/// Portfolio value at the end of one simulated day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub day: usize,
    pub value: f64,
    pub regime: Regime,
}

/// One simulated trajectory, day 0 through the horizon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationPath {
    pub points: Vec<PathPoint>,
}

impl SimulationPath {
    #[must_use]
    pub fn with_capacity(horizon_days: usize) -> Self {
        Self {
            points: Vec::with_capacity(horizon_days + 1),
        }
    }

    pub fn push(&mut self, day: usize, value: f64, regime: Regime) {
        self.points.push(PathPoint { day, value, regime });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value on day `day`, if the path reaches it
    #[must_use]
    pub fn value_at(&self, day: usize) -> Option<f64> {
        self.points.get(day).map(|p| p.value)
    }

    #[must_use]
    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Number of days spent in the bear regime
    #[must_use]
    pub fn bear_days(&self) -> usize {
        self.points
            .iter()
            .skip(1)
            .filter(|p| p.regime == Regime::Bear)
            .count()
    }
}

/// All trajectories from one Monte Carlo batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEnsemble {
    pub initial_capital: f64,
    pub horizon_days: usize,
    /// Seed of path 0; path `i` was seeded with `base_seed + i`
    pub base_seed: u64,
    pub paths: Vec<SimulationPath>,
}

impl SimulationEnsemble {
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Final value of every path, in simulation order
    #[must_use]
    pub fn final_values(&self) -> Vec<f64> {
        self.paths.iter().filter_map(SimulationPath::final_value).collect()
    }

    /// Value of every path on `day`, in simulation order
    #[must_use]
    pub fn values_at(&self, day: usize) -> Vec<f64> {
        self.paths.iter().filter_map(|p| p.value_at(day)).collect()
    }

    #[must_use]
    pub fn mean_final_value(&self) -> Option<f64> {
        if self.paths.is_empty() {
            return None;
        }
        let finals = self.final_values();
        Some(finals.iter().sum::<f64>() / finals.len() as f64)
    }
}
