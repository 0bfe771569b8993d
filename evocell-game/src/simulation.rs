//! Narrative fitness interpretation of stored mission scores.
//!
//! Uses hand-tuned per-mission weights, deliberately separate from the
//! unweighted mean the progress record stores; the two aggregations are
//! never reconciled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::EngineError;
use crate::constants::{
    BASELINE_UNATTEMPTED_SCORE, FITNESS_ADAPTED_MIN, FITNESS_STRUGGLING_MIN, FITNESS_THRIVING_MIN,
};
use crate::missions::Scenario;
use crate::progress::ProgressRecord;
use crate::scoreboard::composite_score;

/// Narrative band for the weighted fitness composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessVerdict {
    Thriving,
    Adapted,
    Struggling,
    Vulnerable,
}

impl std::fmt::Display for FitnessVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitnessVerdict::Thriving => write!(f, "thriving"),
            FitnessVerdict::Adapted => write!(f, "adapted"),
            FitnessVerdict::Struggling => write!(f, "struggling"),
            FitnessVerdict::Vulnerable => write!(f, "vulnerable"),
        }
    }
}

/// Summary shown on the simulation panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessReport {
    pub composite: i32,
    pub verdict: FitnessVerdict,
    pub headline: String,
}

/// Hand-tuned fitness weights for a scenario. Chloroplasts matter more to
/// a flytrap than its peroxisomes; energy and gene control dominate the
/// animal cell.
#[must_use]
pub fn fitness_weights(scenario: Scenario) -> BTreeMap<String, f64> {
    let entries: &[(&str, f64)] = match scenario {
        Scenario::AnimalCell => &[
            ("nucleus", 1.5),
            ("mito", 1.5),
            ("ribosome", 1.0),
            ("er", 0.8),
            ("golgi", 0.8),
            ("lysosome", 1.0),
            ("vacuole", 0.8),
            ("membrane", 1.2),
            ("cytoskel", 1.0),
            ("perox", 0.9),
        ],
        Scenario::VenusFlytrap => &[
            ("nucleus", 1.2),
            ("chlor", 1.6),
            ("rib", 0.9),
            ("er", 0.8),
            ("golgi", 0.8),
            ("vacuole", 1.3),
            ("membrane", 1.0),
            ("cellwall", 1.0),
            ("perox", 0.6),
            ("cyto", 1.1),
        ],
    };
    entries
        .iter()
        .map(|(id, weight)| ((*id).to_string(), *weight))
        .collect()
}

const fn verdict_for(composite: i32) -> FitnessVerdict {
    if composite >= FITNESS_THRIVING_MIN {
        FitnessVerdict::Thriving
    } else if composite >= FITNESS_ADAPTED_MIN {
        FitnessVerdict::Adapted
    } else if composite >= FITNESS_STRUGGLING_MIN {
        FitnessVerdict::Struggling
    } else {
        FitnessVerdict::Vulnerable
    }
}

/// Produce the narrative report for the scenario's stored scores.
///
/// # Errors
///
/// Propagates the scoreboard's fail-fast configuration errors; the
/// built-in weight tables never trigger them.
pub fn fitness_report(
    scenario: Scenario,
    record: &ProgressRecord,
) -> Result<FitnessReport, EngineError> {
    let weights = fitness_weights(scenario);
    let composite = composite_score(&weights, &record.scores, BASELINE_UNATTEMPTED_SCORE)?;
    let verdict = verdict_for(composite);
    Ok(FitnessReport {
        composite,
        verdict,
        headline: format!("result.headline.{verdict}"),
    })
}
