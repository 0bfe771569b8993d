//! Per-visit adaptation session and the engine that folds mini-game
//! completions into it.
//!
//! The session is an owned value threaded through the engine; nothing here
//! is global. It lives for one page visit and is never persisted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::EngineError;
use crate::constants::{
    ADAPTATION_THRESHOLDS, DEFAULT_PLAYER_HANDLE, LOG_EVOLUTION_COMPLETE, LOG_MISSION_APPLIED,
    LOG_MISSION_FAILED, LOG_MISSION_REPEATED,
};
use crate::evolution::EvolutionSequence;
use crate::minigame::MiniGameResult;
use crate::missions::{MissionDefinition, MissionSet};
use crate::numbers::percent_of;

/// Engine lifecycle. The transient `Awarding` step of the state machine
/// happens inside [`AdaptationEngine::award`] and is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    Idle,
    Running,
    Complete,
}

/// Ties an award back to the run that produced it. A token from a
/// cancelled or superseded run is silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken {
    generation: u64,
}

/// One entry of the append-only session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardEvent {
    pub mission_id: String,
    pub title: String,
    pub points: u32,
    pub percent_after: u8,
    pub log_key: String,
}

/// Everything one page visit accumulates. Destroyed on navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptationSession {
    player: String,
    points_awarded: u32,
    max_points: u32,
    thresholds_fired: SmallVec<[u8; 4]>,
    terminal_fired: bool,
    log: Vec<AwardEvent>,
    evolution: Option<EvolutionSequence>,
}

impl AdaptationSession {
    fn new(max_points: u32) -> Self {
        Self {
            player: DEFAULT_PLAYER_HANDLE.to_string(),
            points_awarded: 0,
            max_points,
            thresholds_fired: SmallVec::new(),
            terminal_fired: false,
            log: Vec::new(),
            evolution: None,
        }
    }

    #[must_use]
    pub fn player(&self) -> &str {
        &self.player
    }

    #[must_use]
    pub const fn points_awarded(&self) -> u32 {
        self.points_awarded
    }

    #[must_use]
    pub const fn max_points(&self) -> u32 {
        self.max_points
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_of(self.points_awarded, self.max_points)
    }

    #[must_use]
    pub const fn terminal_fired(&self) -> bool {
        self.terminal_fired
    }

    #[must_use]
    pub fn thresholds_fired(&self) -> &[u8] {
        &self.thresholds_fired
    }

    /// Ordered completion events, append-only, never truncated.
    #[must_use]
    pub fn log(&self) -> &[AwardEvent] {
        &self.log
    }

    /// The terminal sequence, present from the moment the meter fills.
    #[must_use]
    pub const fn evolution(&self) -> Option<&EvolutionSequence> {
        self.evolution.as_ref()
    }

    /// Whether a mission has already granted its points this session.
    #[must_use]
    pub fn has_awarded(&self, mission_id: &str) -> bool {
        self.log
            .iter()
            .any(|event| event.mission_id == mission_id && event.points > 0)
    }
}

/// What one award call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardOutcome {
    /// False when the run token was stale; nothing was mutated.
    pub accepted: bool,
    pub points_applied: u32,
    pub percent: u8,
    /// Visual breakpoints newly crossed by this award, ascending.
    pub thresholds_crossed: SmallVec<[u8; 4]>,
    /// True exactly once per session.
    pub evolution_started: bool,
}

impl AwardOutcome {
    fn ignored(percent: u8) -> Self {
        Self {
            accepted: false,
            points_applied: 0,
            percent,
            thresholds_crossed: SmallVec::new(),
            evolution_started: false,
        }
    }
}

/// State machine folding mission completions into the session meter.
#[derive(Debug, Clone)]
pub struct AdaptationEngine {
    session: AdaptationSession,
    phase: EnginePhase,
    run_seq: u64,
    active_run: Option<u64>,
    evolution_seed: u64,
}

impl AdaptationEngine {
    /// Build an engine for a validated mission set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ZeroWeightTotal`] if the set's weights sum to
    /// zero; the percent computation would be undefined.
    pub fn new(missions: &MissionSet, evolution_seed: u64) -> Result<Self, EngineError> {
        let max_points = missions.max_points();
        if max_points == 0 {
            return Err(EngineError::ZeroWeightTotal);
        }
        Ok(Self {
            session: AdaptationSession::new(max_points),
            phase: EnginePhase::Idle,
            run_seq: 0,
            active_run: None,
            evolution_seed,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> EnginePhase {
        self.phase
    }

    #[must_use]
    pub const fn session(&self) -> &AdaptationSession {
        &self.session
    }

    pub fn set_player(&mut self, name: &str) {
        let trimmed = name.trim();
        self.session.player = if trimmed.is_empty() {
            DEFAULT_PLAYER_HANDLE.to_string()
        } else {
            trimmed.to_string()
        };
    }

    /// Register a fresh mini-game run. Any previously issued token becomes
    /// stale, so a superseded run can no longer award.
    pub fn begin_run(&mut self) -> RunToken {
        if self.phase == EnginePhase::Idle {
            self.phase = EnginePhase::Running;
        }
        self.run_seq += 1;
        self.active_run = Some(self.run_seq);
        RunToken {
            generation: self.run_seq,
        }
    }

    /// Invalidate a run after teardown; its late completion becomes a no-op.
    pub fn cancel_run(&mut self, token: RunToken) {
        if self.active_run == Some(token.generation) {
            self.active_run = None;
        }
    }

    /// Fold one completion into the session: grant the mission's weight on
    /// first success, recompute the percent, fire newly crossed thresholds,
    /// and enter `Complete` exactly once when the meter fills.
    pub fn award(
        &mut self,
        token: RunToken,
        mission: &MissionDefinition,
        result: &MiniGameResult,
    ) -> AwardOutcome {
        if self.active_run != Some(token.generation) {
            return AwardOutcome::ignored(self.session.percent());
        }
        self.active_run = None;

        let repeat = self.session.has_awarded(&mission.id);
        let points = if result.success && !repeat {
            mission.weight
        } else {
            0
        };
        self.session.points_awarded = self.session.points_awarded.saturating_add(points);
        let percent = self.session.percent();

        let mut crossed: SmallVec<[u8; 4]> = SmallVec::new();
        for threshold in ADAPTATION_THRESHOLDS {
            if percent >= threshold && !self.session.thresholds_fired.contains(&threshold) {
                self.session.thresholds_fired.push(threshold);
                crossed.push(threshold);
            }
        }

        let mut evolution_started = false;
        if percent >= 100 && !self.session.terminal_fired {
            self.session.terminal_fired = true;
            self.session.evolution = Some(EvolutionSequence::generate(self.evolution_seed));
            self.phase = EnginePhase::Complete;
            evolution_started = true;
            log::info!(
                "adaptation complete: {} of {} points",
                self.session.points_awarded,
                self.session.max_points
            );
        }

        let log_key = if !result.success {
            LOG_MISSION_FAILED
        } else if repeat {
            LOG_MISSION_REPEATED
        } else if evolution_started {
            LOG_EVOLUTION_COMPLETE
        } else {
            LOG_MISSION_APPLIED
        };
        self.session.log.push(AwardEvent {
            mission_id: mission.id.clone(),
            title: mission.title.clone(),
            points,
            percent_after: percent,
            log_key: log_key.to_string(),
        });

        AwardOutcome {
            accepted: true,
            points_applied: points,
            percent,
            thresholds_crossed: crossed,
            evolution_started,
        }
    }
}
