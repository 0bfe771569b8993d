//! Mission hub: the owning orchestrator.
//!
//! The hub owns the progress record, the adaptation engine, the storage
//! seam, and the single active mini-game run. The UI layer feeds it
//! pointer and tick events and renders from its accessors; all mutation
//! flows through here.

use crate::ProgressStorage;
use crate::EngineError;
use crate::minigame::{
    MiniGame, MiniGameResult, MissionContext, PointerInput, SurfaceInfo, build_minigame,
};
use crate::missions::{MissionDefinition, MissionSet, Scenario};
use crate::progress::ProgressRecord;
use crate::scene::Scene;
use crate::session::{AdaptationEngine, AdaptationSession, AwardOutcome, EnginePhase, RunToken};
use crate::simulation::{FitnessReport, fitness_report};

struct ActiveRun {
    mission_id: String,
    token: RunToken,
    game: Box<dyn MiniGame>,
}

/// What one pointer/tick round produced, for the view to react to.
#[derive(Debug, Default)]
pub struct HubUpdate {
    pub completed: Option<MiniGameResult>,
    pub award: Option<AwardOutcome>,
    /// Score written to the progress record, when the award was accepted.
    pub stored_score: Option<i32>,
}

impl HubUpdate {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.completed.is_none()
    }
}

pub struct MissionHub<S: ProgressStorage> {
    storage: S,
    missions: MissionSet,
    engine: AdaptationEngine,
    record: ProgressRecord,
    surface: SurfaceInfo,
    seed: u64,
    runs_started: u64,
    active: Option<ActiveRun>,
}

impl<S: ProgressStorage> MissionHub<S> {
    /// Build the hub for a scenario, restoring any persisted progress.
    /// Missing or unusable stored data falls back to a fresh record.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the scenario catalog is malformed.
    pub fn new(scenario: Scenario, storage: S, seed: u64) -> Result<Self, EngineError> {
        let missions = MissionSet::for_scenario(scenario)?;
        let engine = AdaptationEngine::new(&missions, seed)?;
        let record = match storage.load() {
            Ok(Some(record)) => record,
            Ok(None) => ProgressRecord::default(),
            Err(err) => {
                log::warn!("progress load failed, starting fresh: {err}");
                ProgressRecord::default()
            }
        };
        Ok(Self {
            storage,
            missions,
            engine,
            record,
            surface: SurfaceInfo::default(),
            seed,
            runs_started: 0,
            active: None,
        })
    }

    pub fn set_surface(&mut self, surface: SurfaceInfo) {
        self.surface = surface;
    }

    pub fn set_player(&mut self, name: &str) {
        self.engine.set_player(name);
    }

    /// Launch a mission's mini-game. Any stale prior run is cancelled
    /// first; only one mini-game is ever active.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownMission`] for an id outside the
    /// catalog and [`EngineError::MissionAlreadyApplied`] when the mission
    /// already granted its points this session.
    pub fn launch(&mut self, mission_id: &str) -> Result<(), EngineError> {
        let mission = self
            .missions
            .mission(mission_id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownMission {
                id: mission_id.to_string(),
            })?;
        if self.engine.session().has_awarded(mission_id) {
            return Err(EngineError::MissionAlreadyApplied {
                id: mission_id.to_string(),
            });
        }
        self.cancel_active();
        let token = self.engine.begin_run();
        self.runs_started += 1;
        let ctx = MissionContext {
            surface: self.surface,
            seed: self.seed.wrapping_add(self.runs_started),
            mission: mission.clone(),
        };
        let mut game = build_minigame(&mission.game);
        game.start(&ctx);
        self.active = Some(ActiveRun {
            mission_id: mission.id,
            token,
            game,
        });
        Ok(())
    }

    /// Tear down the active run, if any. Its completion can no longer
    /// mutate the session.
    pub fn cancel_active(&mut self) {
        if let Some(mut run) = self.active.take() {
            run.game.cancel();
            self.engine.cancel_run(run.token);
        }
    }

    /// Route a pointer event to the active game, then fold any completion.
    pub fn pointer(&mut self, input: PointerInput) -> HubUpdate {
        if let Some(run) = self.active.as_mut() {
            run.game.pointer(input);
        }
        self.poll()
    }

    /// Advance the active game's timers, then fold any completion.
    pub fn tick(&mut self, dt_ms: f64) -> HubUpdate {
        if let Some(run) = self.active.as_mut() {
            run.game.tick(dt_ms);
        }
        self.poll()
    }

    fn poll(&mut self) -> HubUpdate {
        let Some(run) = self.active.as_mut() else {
            return HubUpdate::default();
        };
        let Some(result) = run.game.take_result() else {
            return HubUpdate::default();
        };
        let token = run.token;
        let mission_id = run.mission_id.clone();
        self.active = None;

        let Some(mission) = self.missions.mission(&mission_id).cloned() else {
            return HubUpdate::default();
        };
        let award = self.engine.award(token, &mission, &result);
        let stored_score = if award.accepted {
            let score = self
                .record
                .record_mission_score(&result.mission_id, f64::from(result.raw_score));
            if let Err(err) = self.storage.save(&self.record) {
                log::warn!("progress save failed: {err}");
            }
            Some(score)
        } else {
            None
        };
        HubUpdate {
            completed: Some(result),
            award: Some(award),
            stored_score,
        }
    }

    /// Discard all persisted progress and start a fresh record. The UI
    /// asks the user for confirmation before calling this.
    pub fn reset_progress(&mut self) -> &ProgressRecord {
        self.cancel_active();
        self.record = ProgressRecord::default();
        if let Err(err) = self.storage.clear() {
            log::warn!("progress clear failed: {err}");
        }
        if let Err(err) = self.storage.save(&self.record) {
            log::warn!("progress save failed: {err}");
        }
        &self.record
    }

    /// Export the progress record as a downloadable JSON document.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the record cannot be encoded.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.record.export_json()
    }

    /// Narrative fitness report over the stored scores.
    ///
    /// # Errors
    ///
    /// Propagates scoreboard configuration errors; the built-in weight
    /// tables never trigger them.
    pub fn fitness(&self) -> Result<FitnessReport, EngineError> {
        fitness_report(self.missions.scenario(), &self.record)
    }

    #[must_use]
    pub const fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub const fn session(&self) -> &AdaptationSession {
        self.engine.session()
    }

    #[must_use]
    pub const fn phase(&self) -> EnginePhase {
        self.engine.phase()
    }

    #[must_use]
    pub fn missions(&self) -> &[MissionDefinition] {
        self.missions.missions()
    }

    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        self.missions.scenario()
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.engine.session().percent()
    }

    #[must_use]
    pub fn active_mission(&self) -> Option<&str> {
        self.active.as_ref().map(|run| run.mission_id.as_str())
    }

    /// Scene of the active mini-game, empty when nothing is running.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.active
            .as_ref()
            .map_or_else(Scene::default, |run| run.game.scene())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        record: Rc<RefCell<Option<ProgressRecord>>>,
    }

    impl ProgressStorage for MemoryStore {
        type Error = Infallible;

        fn load(&self) -> Result<Option<ProgressRecord>, Self::Error> {
            Ok(self.record.borrow().clone())
        }

        fn save(&self, record: &ProgressRecord) -> Result<(), Self::Error> {
            *self.record.borrow_mut() = Some(record.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), Self::Error> {
            *self.record.borrow_mut() = None;
            Ok(())
        }
    }

    fn hub() -> (MissionHub<MemoryStore>, MemoryStore) {
        let store = MemoryStore::default();
        let hub = MissionHub::new(Scenario::AnimalCell, store.clone(), 0xC0FFEE).unwrap();
        (hub, store)
    }

    fn charge_core(hub: &mut MissionHub<MemoryStore>, clicks: u32) -> HubUpdate {
        let mut last = HubUpdate::default();
        for _ in 0..clicks {
            last = hub.pointer(PointerInput::Click { x: 320.0, y: 160.0 });
            if !last.is_noop() {
                break;
            }
        }
        last
    }

    #[test]
    fn unknown_missions_are_rejected() {
        let (mut hub, _) = hub();
        let err = hub.launch("flagellum").unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownMission {
                id: "flagellum".to_string()
            }
        );
    }

    #[test]
    fn completing_a_mission_awards_and_persists() {
        let (mut hub, store) = hub();
        hub.launch("mito").unwrap();
        assert_eq!(hub.active_mission(), Some("mito"));

        let update = charge_core(&mut hub, 30);
        let award = update.award.expect("run completed");
        assert!(award.accepted);
        assert_eq!(award.points_applied, 12);
        assert_eq!(award.percent, 12);
        assert_eq!(update.stored_score, Some(100));
        assert!(hub.active_mission().is_none());

        let persisted = store.record.borrow().clone().expect("saved");
        assert_eq!(persisted.scores.get("mito"), Some(&100));
        assert!(persisted.is_completed("mito"));
    }

    #[test]
    fn an_awarded_mission_cannot_relaunch_this_session() {
        let (mut hub, _) = hub();
        hub.launch("mito").unwrap();
        charge_core(&mut hub, 30);
        let err = hub.launch("mito").unwrap_err();
        assert_eq!(
            err,
            EngineError::MissionAlreadyApplied {
                id: "mito".to_string()
            }
        );
    }

    #[test]
    fn relaunching_supersedes_the_previous_run() {
        let (mut hub, _) = hub();
        hub.launch("mito").unwrap();
        charge_core(&mut hub, 5);
        // Relaunch before completion: the first run is torn down.
        hub.launch("mito").unwrap();
        let update = charge_core(&mut hub, 30);
        let award = update.award.expect("second run completed");
        assert!(award.accepted);
        assert_eq!(hub.session().points_awarded(), 12, "awarded exactly once");
    }

    #[test]
    fn cancel_leaves_the_session_untouched() {
        let (mut hub, store) = hub();
        hub.launch("mito").unwrap();
        charge_core(&mut hub, 5);
        hub.cancel_active();
        assert!(hub.active_mission().is_none());
        assert_eq!(hub.session().points_awarded(), 0);
        assert!(store.record.borrow().is_none(), "nothing persisted");
        // Scene of an idle hub is empty.
        assert!(hub.scene().nodes.is_empty());
    }

    #[test]
    fn reset_persists_a_fresh_record() {
        let (mut hub, store) = hub();
        hub.launch("mito").unwrap();
        charge_core(&mut hub, 30);
        assert!(store.record.borrow().is_some());

        hub.reset_progress();
        assert_eq!(hub.record(), &ProgressRecord::default());
        let persisted = store.record.borrow().clone().expect("fresh record saved");
        assert_eq!(persisted, ProgressRecord::default());
    }

    #[test]
    fn corrupt_storage_falls_back_to_a_fresh_record() {
        #[derive(Clone, Default)]
        struct BrokenStore;

        #[derive(Debug, thiserror::Error)]
        #[error("backing store unavailable")]
        struct BrokenStoreError;

        impl ProgressStorage for BrokenStore {
            type Error = BrokenStoreError;

            fn load(&self) -> Result<Option<ProgressRecord>, Self::Error> {
                Err(BrokenStoreError)
            }

            fn save(&self, _record: &ProgressRecord) -> Result<(), Self::Error> {
                Err(BrokenStoreError)
            }

            fn clear(&self) -> Result<(), Self::Error> {
                Err(BrokenStoreError)
            }
        }

        let hub = MissionHub::new(Scenario::VenusFlytrap, BrokenStore, 1).unwrap();
        assert_eq!(hub.record(), &ProgressRecord::default());
    }

    #[test]
    fn export_matches_the_persisted_layout() {
        let (mut hub, _) = hub();
        hub.launch("mito").unwrap();
        charge_core(&mut hub, 30);
        let json = hub.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["missionScores"]["mito"], 100);
        assert_eq!(value["completed"]["mito"], true);
        assert_eq!(value["totalScore"], 100);
    }
}
