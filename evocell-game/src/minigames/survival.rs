//! Survival: slide the paddle to intercept everything falling toward it.
//!
//! `Block` dresses the run as toxins to stop at the membrane; `Catch` as
//! nutrients to collect. The interception math is the same either way.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MINIGAME_PASS_SCORE;
use crate::minigame::{MiniGame, MiniGameResult, MissionContext, PointerInput, RunStatus, SurfaceInfo};
use crate::numbers::{clamp_score, round_f64_to_i32};
use crate::scene::{Scene, SceneNode, Tint};

const PADDLE_HEIGHT: f32 = 12.0;

/// What the falling items represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurvivalMode {
    Block,
    Catch,
}

/// Tuning for a survival run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCfg {
    pub mode: SurvivalMode,
    pub spawn_count: u32,
    pub spawn_interval_ms: f64,
    /// Fall speed in surface pixels per second.
    pub fall_speed: f32,
    pub paddle_width: f32,
    pub item_radius: f32,
}

impl Default for SurvivalCfg {
    fn default() -> Self {
        Self {
            mode: SurvivalMode::Catch,
            spawn_count: 12,
            spawn_interval_ms: 700.0,
            fall_speed: 120.0,
            paddle_width: 90.0,
            item_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Falling {
    x: f32,
    y: f32,
    resolved: bool,
}

#[derive(Debug)]
pub struct SurvivalGame {
    cfg: SurvivalCfg,
    status: RunStatus,
    mission_id: String,
    surface: SurfaceInfo,
    rng: Option<ChaCha20Rng>,
    paddle_x: f32,
    items: Vec<Falling>,
    spawned: u32,
    resolved: u32,
    intercepted: u32,
    spawn_timer_ms: f64,
    pending: Option<MiniGameResult>,
}

impl SurvivalGame {
    #[must_use]
    pub fn new(cfg: SurvivalCfg) -> Self {
        Self {
            cfg,
            status: RunStatus::Idle,
            mission_id: String::new(),
            surface: SurfaceInfo::default(),
            rng: None,
            paddle_x: 0.0,
            items: Vec::new(),
            spawned: 0,
            resolved: 0,
            intercepted: 0,
            spawn_timer_ms: 0.0,
            pending: None,
        }
    }

    fn paddle_line(&self) -> f32 {
        self.surface.height - PADDLE_HEIGHT - self.cfg.item_radius
    }

    fn spawn_one(&mut self) {
        let margin = self.cfg.item_radius;
        let max_x = (self.surface.width - margin).max(margin + 1.0);
        if let Some(rng) = self.rng.as_mut() {
            let x = rng.gen_range(margin..max_x);
            self.items.push(Falling {
                x,
                y: 0.0,
                resolved: false,
            });
            self.spawned += 1;
        }
    }

    fn finish(&mut self) {
        let total = self.cfg.spawn_count.max(1);
        let score = clamp_score(round_f64_to_i32(
            f64::from(self.intercepted) * 100.0 / f64::from(total),
        ));
        self.pending = Some(MiniGameResult {
            mission_id: self.mission_id.clone(),
            raw_score: score,
            success: score >= MINIGAME_PASS_SCORE,
        });
        self.status = RunStatus::Finished;
    }
}

impl MiniGame for SurvivalGame {
    fn start(&mut self, ctx: &MissionContext) {
        if self.status == RunStatus::Running {
            return;
        }
        self.mission_id = ctx.mission.id.clone();
        self.surface = ctx.surface;
        self.rng = Some(ChaCha20Rng::seed_from_u64(ctx.seed));
        self.paddle_x = ctx.surface.width / 2.0;
        self.items.clear();
        self.spawned = 0;
        self.resolved = 0;
        self.intercepted = 0;
        self.spawn_timer_ms = 0.0;
        self.pending = None;
        self.status = RunStatus::Running;
    }

    fn pointer(&mut self, input: PointerInput) {
        if self.status != RunStatus::Running {
            return;
        }
        match input {
            PointerInput::Down { x, .. } | PointerInput::Move { x, .. } => {
                let half = (self.cfg.paddle_width / 2.0).min(self.surface.width / 2.0);
                self.paddle_x = x.clamp(half, self.surface.width - half);
            }
            PointerInput::Up { .. } | PointerInput::Click { .. } => {}
        }
    }

    fn tick(&mut self, dt_ms: f64) {
        if self.status != RunStatus::Running {
            return;
        }
        self.spawn_timer_ms += dt_ms;
        while self.spawn_timer_ms >= self.cfg.spawn_interval_ms && self.spawned < self.cfg.spawn_count
        {
            self.spawn_timer_ms -= self.cfg.spawn_interval_ms;
            self.spawn_one();
        }
        let dy = self.cfg.fall_speed * (dt_ms / 1_000.0) as f32;
        let line = self.paddle_line();
        let half = self.cfg.paddle_width / 2.0;
        let paddle_x = self.paddle_x;
        for item in &mut self.items {
            if item.resolved {
                continue;
            }
            item.y += dy;
            if item.y >= line {
                item.resolved = true;
                self.resolved += 1;
                if (item.x - paddle_x).abs() <= half {
                    self.intercepted += 1;
                }
            }
        }
        if self.spawned == self.cfg.spawn_count && self.resolved == self.spawned {
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
        let mut scene = Scene::with_capacity(self.items.len() + 3);
        let item_tint = match self.cfg.mode {
            SurvivalMode::Block => Tint::Bad,
            SurvivalMode::Catch => Tint::Good,
        };
        for item in &self.items {
            if !item.resolved {
                scene.push(SceneNode::Circle {
                    x: item.x,
                    y: item.y,
                    r: self.cfg.item_radius,
                    tint: item_tint,
                });
            }
        }
        scene.push(SceneNode::Rect {
            x: self.paddle_x - self.cfg.paddle_width / 2.0,
            y: self.surface.height - PADDLE_HEIGHT,
            w: self.cfg.paddle_width,
            h: PADDLE_HEIGHT,
            tint: Tint::Accent,
        });
        let verb = match self.cfg.mode {
            SurvivalMode::Block => "blocked",
            SurvivalMode::Catch => "caught",
        };
        scene.label(
            20.0,
            20.0,
            format!("{} {verb} of {}", self.intercepted, self.cfg.spawn_count),
        );
        scene
    }
}
