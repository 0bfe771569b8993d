//! The mini-game capability contract.
//!
//! Each organelle mission owns a private interaction loop behind this
//! trait. The interaction is free-running: the surface owner feeds pointer
//! events and timer ticks, and the engine only reacts to the terminal
//! completion event surfaced through [`MiniGame::take_result`].

use serde::{Deserialize, Serialize};

use crate::constants::{SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::minigames::{BalanceGame, ChargeGame, SequenceGame, SortingGame, SurvivalGame};
use crate::missions::{GameSpec, MissionDefinition};
use crate::scene::Scene;

/// Geometry of the 2D surface a mini-game runs on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInfo {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceInfo {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
        }
    }
}

/// Pointer interaction scoped to the surface, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Click { x: f32, y: f32 },
}

impl PointerInput {
    #[must_use]
    pub const fn position(self) -> (f32, f32) {
        match self {
            Self::Down { x, y } | Self::Move { x, y } | Self::Up { x, y } | Self::Click { x, y } => {
                (x, y)
            }
        }
    }
}

/// Everything a mini-game needs to begin a run.
#[derive(Debug, Clone)]
pub struct MissionContext {
    pub mission: MissionDefinition,
    pub surface: SurfaceInfo,
    /// Per-run seed; shuffles and spawn patterns are reproducible from it.
    pub seed: u64,
}

/// Terminal event of one mini-game run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameResult {
    pub mission_id: String,
    /// Always an integer in [0, 100].
    pub raw_score: i32,
    pub success: bool,
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Finished,
    Cancelled,
}

/// Capability set every concrete mini-game implements.
pub trait MiniGame {
    /// Begin the interaction. A second call while already running is
    /// ignored.
    fn start(&mut self, ctx: &MissionContext);

    /// Route one pointer event scoped to the surface.
    fn pointer(&mut self, input: PointerInput);

    /// Advance free-running timers by `dt_ms` milliseconds.
    fn tick(&mut self, dt_ms: f64);

    fn status(&self) -> RunStatus;

    /// Yield the completion result. Returns `Some` exactly once per run;
    /// a cancelled run never yields.
    fn take_result(&mut self) -> Option<MiniGameResult>;

    /// Stop timers and discard any pending completion so a late event
    /// cannot mutate state after teardown.
    fn cancel(&mut self);

    /// Pure description of the current visuals.
    fn scene(&self) -> Scene;
}

/// Construct the mini-game for a mission from its tagged spec.
#[must_use]
pub fn build_minigame(spec: &GameSpec) -> Box<dyn MiniGame> {
    match spec {
        GameSpec::Charge(cfg) => Box::new(ChargeGame::new(cfg.clone())),
        GameSpec::Sequence(cfg) => Box::new(SequenceGame::new(cfg.clone())),
        GameSpec::Sorting(cfg) => Box::new(SortingGame::new(cfg.clone())),
        GameSpec::Survival(cfg) => Box::new(SurvivalGame::new(cfg.clone())),
        GameSpec::Balance(cfg) => Box::new(BalanceGame::new(cfg.clone())),
    }
}
