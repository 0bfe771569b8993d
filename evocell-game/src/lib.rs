//! Evocell Game Engine
//!
//! Platform-agnostic core logic for Evocell, an organelle-themed
//! educational game. Mini-games feed a shared adaptation meter that gates
//! a one-shot evolution sequence; this crate provides the mission
//! catalogs, the mini-game contract and its concrete state machines, the
//! adaptation engine, progress persistence, and the fitness simulation,
//! all without UI or platform-specific dependencies.

pub mod constants;
pub mod evolution;
pub mod hub;
pub mod minigame;
pub mod minigames;
pub mod missions;
pub mod numbers;
pub mod progress;
pub mod scene;
pub mod scoreboard;
pub mod session;
pub mod simulation;

// Re-export commonly used types
pub use evolution::{EvolutionParticle, EvolutionSequence};
pub use hub::{HubUpdate, MissionHub};
pub use minigame::{
    MiniGame, MiniGameResult, MissionContext, PointerInput, RunStatus, SurfaceInfo, build_minigame,
};
pub use minigames::{
    BalanceCfg, BalanceGame, ChargeCfg, ChargeGame, SequenceCfg, SequenceGame, SortItem,
    SortingCfg, SortingGame, SurvivalCfg, SurvivalGame, SurvivalMode,
};
pub use missions::{GameSpec, MissionDefinition, MissionSet, Scenario};
pub use progress::ProgressRecord;
pub use scene::{Scene, SceneNode, Tint};
pub use session::{AdaptationEngine, AdaptationSession, AwardEvent, AwardOutcome, EnginePhase, RunToken};
pub use simulation::{FitnessReport, FitnessVerdict, fitness_report, fitness_weights};

use thiserror::Error;

/// Fail-fast configuration and dispatch errors. These indicate programming
/// mistakes, not runtime conditions, and are rejected at setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("mission set is empty")]
    EmptyMissionSet,
    #[error("mission `{id}` has zero weight")]
    ZeroWeight { id: String },
    #[error("duplicate mission id `{id}`")]
    DuplicateMission { id: String },
    #[error("weights mapping is empty")]
    EmptyWeights,
    #[error("weights do not sum to a positive value")]
    ZeroWeightTotal,
    #[error("unknown mission `{id}`")]
    UnknownMission { id: String },
    #[error("mission `{id}` already applied this session")]
    MissionAlreadyApplied { id: String },
}

/// Trait for abstracting progress persistence.
/// Platform-specific implementations should provide this.
pub trait ProgressStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the persisted record. `Ok(None)` means nothing usable is
    /// stored; implementations recover from corrupt payloads by returning
    /// `Ok(None)` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backing store itself is unavailable.
    fn load(&self) -> Result<Option<ProgressRecord>, Self::Error>;

    /// Persist the record under the fixed storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, record: &ProgressRecord) -> Result<(), Self::Error>;

    /// Remove the persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    fn clear(&self) -> Result<(), Self::Error>;
}
