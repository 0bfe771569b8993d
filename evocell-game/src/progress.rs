//! Persisted mission progress.
//!
//! The record keeps the fixed JSON shape
//! `{"missionScores": {...}, "completed": {...}, "totalScore": n}` so it
//! round-trips through storage and the export document without loss.
//! [`ProgressRecord::record_mission_score`] is the single mutation path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::numbers::{clamp_score, i64_to_f64, round_f64_to_i32};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressRecord {
    #[serde(rename = "missionScores", default)]
    pub scores: BTreeMap<String, i32>,
    #[serde(default)]
    pub completed: BTreeMap<String, bool>,
    /// Derived: rounded mean of all recorded scores, 0 when empty.
    #[serde(rename = "totalScore", default)]
    pub total_score: i32,
}

impl ProgressRecord {
    #[must_use]
    pub fn is_completed(&self, mission_id: &str) -> bool {
        self.completed.get(mission_id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.values().filter(|done| **done).count()
    }

    /// Fold one finished mission into the record: clamp and round the raw
    /// score, mark the mission completed, and recompute the mean total.
    /// Returns the stored score.
    pub fn record_mission_score(&mut self, mission_id: &str, raw_score: f64) -> i32 {
        let score = clamp_score(round_f64_to_i32(raw_score));
        self.scores.insert(mission_id.to_string(), score);
        self.completed.insert(mission_id.to_string(), true);
        self.total_score = mean_score(&self.scores);
        score
    }

    /// Pretty JSON export document matching the persisted layout exactly.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the record cannot be encoded.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn mean_score(scores: &BTreeMap<String, i32>) -> i32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: i64 = scores.values().map(|score| i64::from(*score)).sum();
    let count = i64::try_from(scores.len()).unwrap_or(i64::MAX);
    round_f64_to_i32(i64_to_f64(sum) / i64_to_f64(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_rounded_mean_of_scores() {
        let mut record = ProgressRecord::default();
        assert_eq!(record.total_score, 0);

        record.record_mission_score("mito", 80.0);
        assert_eq!(record.total_score, 80);

        record.record_mission_score("nucleus", 75.0);
        assert_eq!(record.total_score, 78, "77.5 rounds up");

        record.record_mission_score("er", 0.0);
        assert_eq!(record.total_score, 52, "(80 + 75 + 0) / 3 rounds to 52");
    }

    #[test]
    fn raw_scores_are_clamped_and_rounded() {
        let mut record = ProgressRecord::default();
        assert_eq!(record.record_mission_score("mito", -10.0), 0);
        assert_eq!(record.record_mission_score("er", 150.0), 100);
        assert_eq!(record.record_mission_score("golgi", 66.6), 67);
        assert!(record.is_completed("mito"));
        assert_eq!(record.completed_count(), 3);
    }

    #[test]
    fn recompletion_overwrites_the_stored_score() {
        let mut record = ProgressRecord::default();
        record.record_mission_score("mito", 40.0);
        record.record_mission_score("mito", 90.0);
        assert_eq!(record.scores.get("mito"), Some(&90));
        assert_eq!(record.total_score, 90);
    }

    #[test]
    fn serde_shape_matches_the_persisted_layout() {
        let mut record = ProgressRecord::default();
        record.record_mission_score("mito", 88.0);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["missionScores"]["mito"], 88);
        assert_eq!(value["completed"]["mito"], true);
        assert_eq!(value["totalScore"], 88);
    }

    #[test]
    fn export_round_trips_losslessly() {
        let mut record = ProgressRecord::default();
        record.record_mission_score("mito", 88.0);
        record.record_mission_score("vacuole", 61.0);
        let json = record.export_json().unwrap();
        let restored: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
