//! Timed accumulation: pulse the organelle core before the clock runs out.

use serde::{Deserialize, Serialize};

use crate::constants::MINIGAME_PASS_SCORE;
use crate::minigame::{MiniGame, MiniGameResult, MissionContext, PointerInput, RunStatus, SurfaceInfo};
use crate::numbers::{clamp_score, round_f64_to_i32};
use crate::scene::{Scene, SceneNode, Tint};

/// Tuning for a charge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeCfg {
    /// Pulses needed for a perfect score.
    pub target_pulses: u32,
    pub time_budget_ms: f64,
    /// Radius of the clickable core.
    pub core_radius: f32,
}

impl Default for ChargeCfg {
    fn default() -> Self {
        Self {
            target_pulses: 30,
            time_budget_ms: 8_000.0,
            core_radius: 70.0,
        }
    }
}

#[derive(Debug)]
pub struct ChargeGame {
    cfg: ChargeCfg,
    status: RunStatus,
    mission_id: String,
    surface: SurfaceInfo,
    elapsed_ms: f64,
    pulses: u32,
    pending: Option<MiniGameResult>,
}

impl ChargeGame {
    #[must_use]
    pub fn new(cfg: ChargeCfg) -> Self {
        Self {
            cfg,
            status: RunStatus::Idle,
            mission_id: String::new(),
            surface: SurfaceInfo::default(),
            elapsed_ms: 0.0,
            pulses: 0,
            pending: None,
        }
    }

    fn core_center(&self) -> (f32, f32) {
        (self.surface.width / 2.0, self.surface.height / 2.0)
    }

    fn finish(&mut self) {
        let target = self.cfg.target_pulses.max(1);
        let raw = f64::from(self.pulses) * 100.0 / f64::from(target);
        let score = clamp_score(round_f64_to_i32(raw));
        self.pending = Some(MiniGameResult {
            mission_id: self.mission_id.clone(),
            raw_score: score,
            success: score >= MINIGAME_PASS_SCORE,
        });
        self.status = RunStatus::Finished;
    }
}

impl MiniGame for ChargeGame {
    fn start(&mut self, ctx: &MissionContext) {
        if self.status == RunStatus::Running {
            return;
        }
        self.mission_id = ctx.mission.id.clone();
        self.surface = ctx.surface;
        self.elapsed_ms = 0.0;
        self.pulses = 0;
        self.pending = None;
        self.status = RunStatus::Running;
    }

    fn pointer(&mut self, input: PointerInput) {
        if self.status != RunStatus::Running {
            return;
        }
        if let PointerInput::Click { x, y } | PointerInput::Down { x, y } = input {
            let (cx, cy) = self.core_center();
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= self.cfg.core_radius * self.cfg.core_radius {
                self.pulses = self.pulses.saturating_add(1);
                if self.pulses >= self.cfg.target_pulses {
                    self.finish();
                }
            }
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
        let mut scene = Scene::with_capacity(4);
        let (cx, cy) = self.core_center();
        let target = self.cfg.target_pulses.max(1);
        let fraction = (self.pulses as f32 / target as f32).min(1.0);
        scene.push(SceneNode::Circle {
            x: cx,
            y: cy,
            r: self.cfg.core_radius * (0.6 + 0.4 * fraction),
            tint: Tint::Accent,
        });
        scene.push(SceneNode::Gauge {
            x: 20.0,
            y: 12.0,
            w: self.surface.width - 40.0,
            h: 10.0,
            fraction,
        });
        let remaining_ms = (self.cfg.time_budget_ms - self.elapsed_ms).max(0.0);
        scene.label(20.0, 40.0, format!("{:.1}s", remaining_ms / 1_000.0));
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::testutil::fixture_ctx;

    fn started(cfg: ChargeCfg) -> ChargeGame {
        let mut game = ChargeGame::new(cfg);
        game.start(&fixture_ctx(1));
        game
    }

    fn click_core(game: &mut ChargeGame, times: u32) {
        for _ in 0..times {
            game.pointer(PointerInput::Click { x: 320.0, y: 160.0 });
        }
    }

    #[test]
    fn reaching_target_finishes_with_full_score() {
        let mut game = started(ChargeCfg::default());
        click_core(&mut game, 30);
        assert_eq!(game.status(), RunStatus::Finished);
        let result = game.take_result().expect("result pending");
        assert_eq!(result.raw_score, 100);
        assert!(result.success);
        assert!(game.take_result().is_none(), "result is single-shot");
    }

    #[test]
    fn timeout_grades_partial_charge() {
        let mut game = started(ChargeCfg::default());
        click_core(&mut game, 10);
        game.tick(9_000.0);
        let result = game.take_result().expect("result pending");
        assert_eq!(result.raw_score, 33);
        assert!(!result.success);
    }

    #[test]
    fn clicks_outside_the_core_do_not_count() {
        let mut game = started(ChargeCfg::default());
        game.pointer(PointerInput::Click { x: 2.0, y: 2.0 });
        game.tick(9_000.0);
        let result = game.take_result().expect("result pending");
        assert_eq!(result.raw_score, 0);
    }

    #[test]
    fn double_start_is_ignored_while_running() {
        let mut game = started(ChargeCfg::default());
        click_core(&mut game, 5);
        game.start(&fixture_ctx(2));
        game.tick(9_000.0);
        let result = game.take_result().expect("result pending");
        assert_eq!(result.raw_score, 17, "progress survives the second start");
    }

    #[test]
    fn cancel_discards_any_completion() {
        let mut game = started(ChargeCfg::default());
        click_core(&mut game, 30);
        game.cancel();
        assert_eq!(game.status(), RunStatus::Cancelled);
        assert!(game.take_result().is_none());
    }
}
