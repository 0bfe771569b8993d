//! Weighted composite scoring over recorded mission scores.
//!
//! This is the "fitness" aggregation: hand-tuned weights over selected
//! missions, deliberately distinct from the unweighted mean the progress
//! record stores.

use std::collections::BTreeMap;

use crate::EngineError;
use crate::numbers::round_f64_to_i32;

/// Blend the recorded `scores` by `weights`. Missions without a recorded
/// score contribute `default_if_missing` instead of zero, so unexplored
/// missions are not punished disproportionately. Normalization is by the
/// actual weight sum; weights need not sum to 1.
///
/// # Errors
///
/// Returns [`EngineError::EmptyWeights`] for an empty weights mapping and
/// [`EngineError::ZeroWeightTotal`] when the weights do not sum to a
/// positive value. Both are caller bugs and fail fast.
pub fn composite_score(
    weights: &BTreeMap<String, f64>,
    scores: &BTreeMap<String, i32>,
    default_if_missing: i32,
) -> Result<i32, EngineError> {
    if weights.is_empty() {
        return Err(EngineError::EmptyWeights);
    }
    let weight_sum: f64 = weights.values().sum();
    if !(weight_sum > 0.0) {
        return Err(EngineError::ZeroWeightTotal);
    }
    let mut acc = 0.0;
    for (mission_id, weight) in weights {
        let score = scores
            .get(mission_id)
            .copied()
            .unwrap_or(default_if_missing);
        acc += f64::from(score) * weight;
    }
    Ok(round_f64_to_i32(acc / weight_sum).clamp(0, 100))
}
