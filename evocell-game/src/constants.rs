//! Centralized balance and tuning constants for the Evocell engine.
//!
//! Gameplay numbers live here so they can only change through reviewed
//! code, not through external assets.

// Storage ------------------------------------------------------------------
pub const PROGRESS_STORAGE_KEY: &str = "evocell.progress";

// Log keys -----------------------------------------------------------------
pub const LOG_MISSION_APPLIED: &str = "log.mission.applied";
pub const LOG_MISSION_REPEATED: &str = "log.mission.repeated";
pub const LOG_MISSION_FAILED: &str = "log.mission.failed";
pub const LOG_EVOLUTION_COMPLETE: &str = "log.evolution.complete";

// Adaptation tuning --------------------------------------------------------
/// Percent breakpoints that trigger a visual stage change, ascending.
pub const ADAPTATION_THRESHOLDS: [u8; 3] = [30, 50, 80];
/// Score substituted for missions the player has not attempted yet.
pub const BASELINE_UNATTEMPTED_SCORE: i32 = 40;
/// Raw score at or above which a run counts as a successful completion.
pub const MINIGAME_PASS_SCORE: i32 = 50;
pub const DEFAULT_PLAYER_HANDLE: &str = "Explorer";

// Fitness bands ------------------------------------------------------------
pub(crate) const FITNESS_THRIVING_MIN: i32 = 85;
pub(crate) const FITNESS_ADAPTED_MIN: i32 = 65;
pub(crate) const FITNESS_STRUGGLING_MIN: i32 = 45;

// Evolution sequence -------------------------------------------------------
pub(crate) const EVOLUTION_PARTICLES: usize = 30;
pub(crate) const EVOLUTION_BASE_DELAY_MS: f32 = 50.0;
pub(crate) const EVOLUTION_STAGGER_MS: f32 = 30.0;
pub(crate) const EVOLUTION_SETTLE_MS: f32 = 800.0;
pub(crate) const EVOLUTION_SPREAD_X: f32 = 500.0;
pub(crate) const EVOLUTION_SPREAD_Y: f32 = 100.0;
pub(crate) const EVOLUTION_MARGIN: f32 = 30.0;

// Mini-game surface defaults -----------------------------------------------
pub const SURFACE_WIDTH: f32 = 640.0;
pub const SURFACE_HEIGHT: f32 = 320.0;
