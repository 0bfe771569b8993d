//! Balance: set a response level matching an environmental parameter.
//!
//! The run shows the parameter as a gauge; the player drags a slider and
//! releases to commit. Score falls off with the scaled absolute error.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MINIGAME_PASS_SCORE;
use crate::minigame::{MiniGame, MiniGameResult, MissionContext, PointerInput, RunStatus, SurfaceInfo};
use crate::numbers::{clamp_score, round_f64_to_i32};
use crate::scene::{Scene, SceneNode, Tint};

const TRACK_MARGIN: f32 = 40.0;
const TRACK_HIT_BAND: f32 = 30.0;

/// Tuning for a balance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceCfg {
    /// Display name of the environmental parameter being matched.
    pub parameter: String,
    pub range_min: f32,
    pub range_max: f32,
    /// Error multiplier; higher values punish misses harder.
    pub error_scale: f32,
    pub time_budget_ms: f64,
}

impl Default for BalanceCfg {
    fn default() -> Self {
        Self {
            parameter: "stimulus".to_string(),
            range_min: 0.0,
            range_max: 100.0,
            error_scale: 2.0,
            time_budget_ms: 12_000.0,
        }
    }
}

#[derive(Debug)]
pub struct BalanceGame {
    cfg: BalanceCfg,
    status: RunStatus,
    mission_id: String,
    surface: SurfaceInfo,
    elapsed_ms: f64,
    /// Environmental parameter as a fraction of the range.
    env: f32,
    chosen: f32,
    dragging: bool,
    pending: Option<MiniGameResult>,
}

impl BalanceGame {
    #[must_use]
    pub fn new(cfg: BalanceCfg) -> Self {
        Self {
            cfg,
            status: RunStatus::Idle,
            mission_id: String::new(),
            surface: SurfaceInfo::default(),
            elapsed_ms: 0.0,
            env: 0.0,
            chosen: 0.0,
            dragging: false,
            pending: None,
        }
    }

    fn span(&self) -> f32 {
        (self.cfg.range_max - self.cfg.range_min).max(f32::EPSILON)
    }

    fn target(&self) -> f32 {
        self.cfg.range_min + self.env * self.span()
    }

    fn track_x(&self) -> f32 {
        TRACK_MARGIN
    }

    fn track_w(&self) -> f32 {
        self.surface.width - 2.0 * TRACK_MARGIN
    }

    fn track_y(&self) -> f32 {
        self.surface.height * 0.6
    }

    fn on_track(&self, y: f32) -> bool {
        (y - self.track_y()).abs() <= TRACK_HIT_BAND
    }

    fn set_from_x(&mut self, x: f32) {
        let frac = ((x - self.track_x()) / self.track_w()).clamp(0.0, 1.0);
        self.chosen = self.cfg.range_min + frac * self.span();
    }

    fn finish(&mut self) {
        let err = f64::from((self.chosen - self.target()).abs() / self.span());
        let penalty = round_f64_to_i32(f64::from(self.cfg.error_scale) * err * 100.0);
        let score = clamp_score(100 - penalty);
        self.pending = Some(MiniGameResult {
            mission_id: self.mission_id.clone(),
            raw_score: score,
            success: score >= MINIGAME_PASS_SCORE,
        });
        self.status = RunStatus::Finished;
    }

    #[cfg(test)]
    pub(crate) fn target_value(&self) -> f32 {
        self.target()
    }
}

impl MiniGame for BalanceGame {
    fn start(&mut self, ctx: &MissionContext) {
        if self.status == RunStatus::Running {
            return;
        }
        let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
        self.mission_id = ctx.mission.id.clone();
        self.surface = ctx.surface;
        self.elapsed_ms = 0.0;
        self.env = rng.gen_range(0.1..0.9);
        self.chosen = self.cfg.range_min + 0.5 * self.span();
        self.dragging = false;
        self.pending = None;
        self.status = RunStatus::Running;
    }

    fn pointer(&mut self, input: PointerInput) {
        if self.status != RunStatus::Running {
            return;
        }
        match input {
            PointerInput::Down { x, y } => {
                if self.on_track(y) {
                    self.dragging = true;
                    self.set_from_x(x);
                }
            }
            PointerInput::Move { x, .. } => {
                if self.dragging {
                    self.set_from_x(x);
                }
            }
            PointerInput::Up { x, .. } => {
                if self.dragging {
                    self.set_from_x(x);
                    self.finish();
                }
            }
            PointerInput::Click { .. } => {}
        }
    }

    fn tick(&mut self, dt_ms: f64) {
        if self.status != RunStatus::Running {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.cfg.time_budget_ms {
            self.finish();
        }
    }

    fn status(&self) -> RunStatus {
        self.status
    }

    fn take_result(&mut self) -> Option<MiniGameResult> {
        self.pending.take()
    }

    fn cancel(&mut self) {
        self.pending = None;
        if self.status != RunStatus::Idle {
            self.status = RunStatus::Cancelled;
        }
    }

    fn scene(&self) -> Scene {
        let mut scene = Scene::with_capacity(6);
        scene.label(TRACK_MARGIN, 24.0, self.cfg.parameter.clone());
        scene.push(SceneNode::Gauge {
            x: TRACK_MARGIN,
            y: 36.0,
            w: self.track_w(),
            h: 14.0,
            fraction: self.env,
        });
        scene.push(SceneNode::Rect {
            x: self.track_x(),
            y: self.track_y() - 4.0,
            w: self.track_w(),
            h: 8.0,
            tint: Tint::Muted,
        });
        let knob_frac = (self.chosen - self.cfg.range_min) / self.span();
        scene.push(SceneNode::Circle {
            x: self.track_x() + knob_frac * self.track_w(),
            y: self.track_y(),
            r: 10.0,
            tint: Tint::Accent,
        });
        scene.label(
            TRACK_MARGIN,
            self.surface.height - 16.0,
            "drag the slider, release to commit",
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::testutil::fixture_ctx;

    fn started(seed: u64) -> BalanceGame {
        let mut game = BalanceGame::new(BalanceCfg::default());
        game.start(&fixture_ctx(seed));
        game
    }

    fn slider_x(game: &BalanceGame, value: f32) -> f32 {
        let frac = (value - game.cfg.range_min) / (game.cfg.range_max - game.cfg.range_min);
        TRACK_MARGIN + frac * (game.surface.width - 2.0 * TRACK_MARGIN)
    }

    #[test]
    fn exact_match_scores_full() {
        let mut game = started(7);
        let x = slider_x(&game, game.target_value());
        let y = game.surface.height * 0.6;
        game.pointer(PointerInput::Down { x, y });
        game.pointer(PointerInput::Up { x, y });
        let result = game.take_result().expect("committed");
        assert_eq!(result.raw_score, 100);
        assert!(result.success);
    }

    #[test]
    fn miss_is_penalized_by_scaled_error() {
        let mut game = started(7);
        let target = game.target_value();
        let x = slider_x(&game, game.cfg.range_min);
        let y = game.surface.height * 0.6;
        game.pointer(PointerInput::Down { x, y });
        game.pointer(PointerInput::Up { x, y });
        let result = game.take_result().expect("committed");
        let err = f64::from(target / 100.0);
        let expected = (100 - crate::numbers::round_f64_to_i32(2.0 * err * 100.0)).max(0);
        assert_eq!(result.raw_score, expected);
    }

    #[test]
    fn drag_off_track_does_not_commit() {
        let mut game = started(7);
        game.pointer(PointerInput::Down { x: 100.0, y: 10.0 });
        game.pointer(PointerInput::Up { x: 100.0, y: 10.0 });
        assert_eq!(game.status(), RunStatus::Running);
        assert!(game.take_result().is_none());
    }

    #[test]
    fn timeout_commits_current_choice() {
        let mut game = started(7);
        game.tick(12_500.0);
        assert_eq!(game.status(), RunStatus::Finished);
        assert!(game.take_result().is_some());
    }
}
