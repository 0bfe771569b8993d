//! Sorting: send each queued item to its matching destination bin.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MINIGAME_PASS_SCORE;
use crate::minigame::{MiniGame, MiniGameResult, MissionContext, PointerInput, RunStatus, SurfaceInfo};
use crate::numbers::{clamp_score, round_f64_to_i32};
use crate::scene::{Scene, SceneNode, Tint};

const BIN_PAD: f32 = 8.0;
const BIN_TOP: f32 = 10.0;

/// One item waiting to be sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub label: String,
    /// Index into [`SortingCfg::bins`] of the correct destination.
    pub bin: usize,
}

/// Tuning for a sorting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortingCfg {
    pub bins: Vec<String>,
    pub items: Vec<SortItem>,
    pub time_budget_ms: f64,
}

impl Default for SortingCfg {
    fn default() -> Self {
        Self {
            bins: vec!["left".to_string(), "right".to_string()],
            items: vec![
                SortItem { label: "alpha".to_string(), bin: 0 },
                SortItem { label: "beta".to_string(), bin: 1 },
            ],
            time_budget_ms: 20_000.0,
        }
    }
}

#[derive(Debug)]
pub struct SortingGame {
    cfg: SortingCfg,
    status: RunStatus,
    mission_id: String,
    surface: SurfaceInfo,
    elapsed_ms: f64,
    /// Presentation order over `cfg.items`, shuffled at start.
    queue: Vec<usize>,
    cursor: usize,
    placed: u32,
    correct: u32,
    pending: Option<MiniGameResult>,
}

impl SortingGame {
    #[must_use]
    pub fn new(cfg: SortingCfg) -> Self {
        Self {
            cfg,
            status: RunStatus::Idle,
            mission_id: String::new(),
            surface: SurfaceInfo::default(),
            elapsed_ms: 0.0,
            queue: Vec::new(),
            cursor: 0,
            placed: 0,
            correct: 0,
            pending: None,
        }
    }

    fn bin_width(&self) -> f32 {
        self.surface.width / self.cfg.bins.len().max(1) as f32
    }

    fn bin_height(&self) -> f32 {
        self.surface.height * 0.35
    }

    fn bin_at(&self, x: f32, y: f32) -> Option<usize> {
        if y < BIN_TOP || y > BIN_TOP + self.bin_height() {
            return None;
        }
        let bin_w = self.bin_width();
        let bin = (x / bin_w).floor();
        if bin < 0.0 || bin >= self.cfg.bins.len() as f32 {
            return None;
        }
        let idx = bin as usize;
        let left = idx as f32 * bin_w + BIN_PAD;
        let right = (idx as f32 + 1.0) * bin_w - BIN_PAD;
        (x >= left && x <= right).then_some(idx)
    }

    fn current(&self) -> Option<&SortItem> {
        self.queue.get(self.cursor).map(|idx| &self.cfg.items[*idx])
    }

    fn finish(&mut self) {
        let score = if self.placed == 0 {
            0
        } else {
            clamp_score(round_f64_to_i32(
                f64::from(self.correct) * 100.0 / f64::from(self.placed),
            ))
        };
        self.pending = Some(MiniGameResult {
            mission_id: self.mission_id.clone(),
            raw_score: score,
            success: score >= MINIGAME_PASS_SCORE,
        });
        self.status = RunStatus::Finished;
    }

    #[cfg(test)]
    pub(crate) fn current_item(&self) -> Option<&SortItem> {
        self.current()
    }
}

impl MiniGame for SortingGame {
    fn start(&mut self, ctx: &MissionContext) {
        if self.status == RunStatus::Running {
            return;
        }
        let count = self.cfg.items.len();
        let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
        let mut queue: Vec<usize> = (0..count).collect();
        for i in (1..count).rev() {
            let j = rng.gen_range(0..=i);
            queue.swap(i, j);
        }
        self.mission_id = ctx.mission.id.clone();
        self.surface = ctx.surface;
        self.elapsed_ms = 0.0;
        self.queue = queue;
        self.cursor = 0;
        self.placed = 0;
        self.correct = 0;
        self.pending = None;
        self.status = RunStatus::Running;
    }

    fn pointer(&mut self, input: PointerInput) {
        if self.status != RunStatus::Running {
            return;
        }
        if let PointerInput::Click { x, y } = input {
            let Some(bin) = self.bin_at(x, y) else {
                return;
            };
            let Some(item) = self.current() else {
                return;
            };
            let hit = item.bin == bin;
            self.placed += 1;
            if hit {
                self.correct += 1;
            }
            self.cursor += 1;
            if self.cursor == self.queue.len() {
                self.finish();
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
        let mut scene = Scene::with_capacity(self.cfg.bins.len() * 2 + 3);
        let bin_w = self.bin_width();
        for (bin, label) in self.cfg.bins.iter().enumerate() {
            let left = bin as f32 * bin_w + BIN_PAD;
            scene.push(SceneNode::Rect {
                x: left,
                y: BIN_TOP,
                w: bin_w - 2.0 * BIN_PAD,
                h: self.bin_height(),
                tint: Tint::Muted,
            });
            scene.label(
                left + (bin_w - 2.0 * BIN_PAD) / 2.0,
                BIN_TOP + self.bin_height() / 2.0,
                label.clone(),
            );
        }
        if let Some(item) = self.current() {
            scene.push(SceneNode::Circle {
                x: self.surface.width / 2.0,
                y: self.surface.height * 0.8,
                r: 16.0,
                tint: Tint::Accent,
            });
            scene.label(
                self.surface.width / 2.0,
                self.surface.height * 0.8,
                item.label.clone(),
            );
        }
        scene.label(
            20.0,
            self.surface.height - 10.0,
            format!("{} sorted", self.placed),
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::testutil::fixture_ctx;

    fn four_item_cfg() -> SortingCfg {
        SortingCfg {
            bins: vec!["vesicle".to_string(), "membrane".to_string()],
            items: vec![
                SortItem { label: "enzyme".to_string(), bin: 0 },
                SortItem { label: "lipid".to_string(), bin: 1 },
                SortItem { label: "hydrolase".to_string(), bin: 0 },
                SortItem { label: "sterol".to_string(), bin: 1 },
            ],
            time_budget_ms: 20_000.0,
        }
    }

    fn started() -> SortingGame {
        let mut game = SortingGame::new(four_item_cfg());
        game.start(&fixture_ctx(3));
        game
    }

    fn click_bin(game: &mut SortingGame, bin: usize) {
        let bin_w = game.bin_width();
        let x = bin as f32 * bin_w + bin_w / 2.0;
        let y = BIN_TOP + game.bin_height() / 2.0;
        game.pointer(PointerInput::Click { x, y });
    }

    #[test]
    fn sorting_everything_correctly_scores_full() {
        let mut game = started();
        while let Some(bin) = game.current_item().map(|item| item.bin) {
            click_bin(&mut game, bin);
        }
        let result = game.take_result().expect("all items placed");
        assert_eq!(result.raw_score, 100);
        assert!(result.success);
    }

    #[test]
    fn score_counts_correct_over_placed() {
        let mut game = started();
        // Send everything to bin 0; only the two bin-0 items land right.
        for _ in 0..4 {
            click_bin(&mut game, 0);
        }
        let result = game.take_result().expect("all items placed");
        assert_eq!(result.raw_score, 50);
    }

    #[test]
    fn timeout_with_nothing_placed_scores_zero() {
        let mut game = started();
        game.tick(21_000.0);
        let result = game.take_result().expect("timed out");
        assert_eq!(result.raw_score, 0);
        assert!(!result.success);
    }

    #[test]
    fn partial_run_grades_placed_items_only() {
        let mut game = started();
        let bin = game.current_item().map(|item| item.bin).expect("queued");
        click_bin(&mut game, bin);
        game.tick(21_000.0);
        let result = game.take_result().expect("timed out");
        assert_eq!(result.raw_score, 100, "one placed, one correct");
    }
}
