use crate::model::{GoalProbability, SimulationEnsemble};

/// Probability of ending at or above `target`, and the first day on which
/// at least half of the paths are there
#[must_use]
pub fn goal_probability(ensemble: &SimulationEnsemble, target: f64) -> Option<GoalProbability> {
    if ensemble.is_empty() {
        return None;
    }
    let n = ensemble.len() as f64;

    let reached = ensemble
        .final_values()
        .into_iter()
        .filter(|&v| v >= target)
        .count();

    let median_crossing_day = (0..=ensemble.horizon_days).find(|&day| {
        let at_or_above = ensemble
            .paths
            .iter()
            .filter(|p| p.value_at(day).is_some_and(|v| v >= target))
            .count();
        at_or_above as f64 / n >= 0.5
    });

    Some(GoalProbability {
        target,
        probability: reached as f64 / n * 100.0,
        median_crossing_day,
    })
}
