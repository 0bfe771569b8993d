//! Ordering: pick items from a shuffled tray and build the correct chain.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MINIGAME_PASS_SCORE;
use crate::minigame::{MiniGame, MiniGameResult, MissionContext, PointerInput, RunStatus, SurfaceInfo};
use crate::numbers::{clamp_score, round_f64_to_i32};
use crate::scene::{Scene, SceneNode, Tint};

const SLOT_PAD: f32 = 6.0;
const CHAIN_Y: f32 = 20.0;

/// Tuning for a sequence run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceCfg {
    /// Items in their correct order.
    pub items: Vec<String>,
    /// Score deduction per item left unplaced at timeout.
    pub mismatch_penalty: i32,
    pub time_budget_ms: f64,
}

impl Default for SequenceCfg {
    fn default() -> Self {
        Self {
            items: vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
            ],
            mismatch_penalty: 15,
            time_budget_ms: 20_000.0,
        }
    }
}

#[derive(Debug)]
pub struct SequenceGame {
    cfg: SequenceCfg,
    status: RunStatus,
    mission_id: String,
    surface: SurfaceInfo,
    elapsed_ms: f64,
    /// Tray slot -> item index, shuffled at start.
    tray: Vec<usize>,
    used: Vec<bool>,
    /// Item indices in placement order.
    placed: Vec<usize>,
    pending: Option<MiniGameResult>,
}

impl SequenceGame {
    #[must_use]
    pub fn new(cfg: SequenceCfg) -> Self {
        Self {
            cfg,
            status: RunStatus::Idle,
            mission_id: String::new(),
            surface: SurfaceInfo::default(),
            elapsed_ms: 0.0,
            tray: Vec::new(),
            used: Vec::new(),
            placed: Vec::new(),
            pending: None,
        }
    }

    fn slot_width(&self) -> f32 {
        self.surface.width / self.cfg.items.len().max(1) as f32
    }

    fn tray_top(&self) -> f32 {
        self.surface.height * 0.55
    }

    fn tray_height(&self) -> f32 {
        self.surface.height * 0.3
    }

    fn slot_at(&self, x: f32, y: f32) -> Option<usize> {
        if y < self.tray_top() || y > self.tray_top() + self.tray_height() {
            return None;
        }
        let slot_w = self.slot_width();
        let slot = (x / slot_w).floor();
        if slot < 0.0 || slot >= self.tray.len() as f32 {
            return None;
        }
        let idx = slot as usize;
        let left = idx as f32 * slot_w + SLOT_PAD;
        let right = (idx as f32 + 1.0) * slot_w - SLOT_PAD;
        (x >= left && x <= right).then_some(idx)
    }

    fn finish(&mut self) {
        let total = self.cfg.items.len().max(1);
        let matches = self
            .placed
            .iter()
            .enumerate()
            .filter(|(position, item)| position == *item)
            .count();
        let base = round_f64_to_i32(matches as f64 * 100.0 / total as f64);
        let shortfall = total.saturating_sub(self.placed.len());
        let penalty = self
            .cfg
            .mismatch_penalty
            .saturating_mul(i32::try_from(shortfall).unwrap_or(i32::MAX));
        let score = clamp_score(base.saturating_sub(penalty));
        self.pending = Some(MiniGameResult {
            mission_id: self.mission_id.clone(),
            raw_score: score,
            success: score >= MINIGAME_PASS_SCORE,
        });
        self.status = RunStatus::Finished;
    }

    #[cfg(test)]
    pub(crate) fn tray_order(&self) -> &[usize] {
        &self.tray
    }
}

impl MiniGame for SequenceGame {
    fn start(&mut self, ctx: &MissionContext) {
        if self.status == RunStatus::Running {
            return;
        }
        let count = self.cfg.items.len();
        let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
        let mut tray: Vec<usize> = (0..count).collect();
        for i in (1..count).rev() {
            let j = rng.gen_range(0..=i);
            tray.swap(i, j);
        }
        self.mission_id = ctx.mission.id.clone();
        self.surface = ctx.surface;
        self.elapsed_ms = 0.0;
        self.tray = tray;
        self.used = vec![false; count];
        self.placed = Vec::with_capacity(count);
        self.pending = None;
        self.status = RunStatus::Running;
    }

    fn pointer(&mut self, input: PointerInput) {
        if self.status != RunStatus::Running {
            return;
        }
        if let PointerInput::Click { x, y } = input {
            if let Some(slot) = self.slot_at(x, y) {
                if !self.used[slot] {
                    self.used[slot] = true;
                    self.placed.push(self.tray[slot]);
                    if self.placed.len() == self.cfg.items.len() {
                        self.finish();
                    }
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
        let mut scene = Scene::with_capacity(self.tray.len() * 2 + 3);
        // Chain built so far, along the top.
        for (position, item) in self.placed.iter().enumerate() {
            let x = 20.0 + position as f32 * 90.0;
            let tint = if position == *item { Tint::Good } else { Tint::Bad };
            scene.push(SceneNode::Rect {
                x,
                y: CHAIN_Y - 12.0,
                w: 80.0,
                h: 24.0,
                tint,
            });
            scene.label(x + 6.0, CHAIN_Y, self.cfg.items[*item].clone());
        }
        // Remaining tray slots.
        let slot_w = self.slot_width();
        for (slot, item) in self.tray.iter().enumerate() {
            if self.used[slot] {
                continue;
            }
            let left = slot as f32 * slot_w + SLOT_PAD;
            scene.push(SceneNode::Rect {
                x: left,
                y: self.tray_top(),
                w: slot_w - 2.0 * SLOT_PAD,
                h: self.tray_height(),
                tint: Tint::Neutral,
            });
            scene.label(
                left + (slot_w - 2.0 * SLOT_PAD) / 2.0,
                self.tray_top() + self.tray_height() / 2.0,
                self.cfg.items[*item].clone(),
            );
        }
        let remaining_ms = (self.cfg.time_budget_ms - self.elapsed_ms).max(0.0);
        scene.label(20.0, self.surface.height - 10.0, format!("{:.0}s", remaining_ms / 1_000.0));
        scene
    }
}
