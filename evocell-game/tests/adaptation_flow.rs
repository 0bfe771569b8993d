//! End-to-end campaign: drive every animal-cell mission through the public
//! hub API, reading only the rendered scene, until the evolution fires.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use evocell_game::{
    EnginePhase, GameSpec, MissionHub, PointerInput, ProgressRecord, ProgressStorage, Scenario,
    SceneNode, SequenceCfg, SortingCfg,
};

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

const SURFACE_W: f32 = 640.0;
const SURFACE_H: f32 = 320.0;

/// Find a label in the scene, restricted to a vertical band.
fn find_label(
    hub: &MissionHub<MemoryStore>,
    text: &str,
    min_y: f32,
    max_y: f32,
) -> Option<(f32, f32)> {
    hub.scene().nodes.iter().find_map(|node| match node {
        SceneNode::Label { x, y, text: t } if t == text && *y >= min_y && *y <= max_y => {
            Some((*x, *y))
        }
        _ => None,
    })
}

fn drive_charge(hub: &mut MissionHub<MemoryStore>) -> evocell_game::HubUpdate {
    for _ in 0..200 {
        let update = hub.pointer(PointerInput::Click {
            x: SURFACE_W / 2.0,
            y: SURFACE_H / 2.0,
        });
        if !update.is_noop() {
            return update;
        }
    }
    panic!("charge run never completed");
}

fn drive_sequence(hub: &mut MissionHub<MemoryStore>, cfg: &SequenceCfg) -> evocell_game::HubUpdate {
    let mut last = None;
    for item in &cfg.items {
        let (x, y) = find_label(hub, item, SURFACE_H / 2.0, SURFACE_H)
            .unwrap_or_else(|| panic!("tray item `{item}` not in scene"));
        last = Some(hub.pointer(PointerInput::Click { x, y }));
    }
    last.expect("sequence has items")
}

fn drive_sorting(hub: &mut MissionHub<MemoryStore>, cfg: &SortingCfg) -> evocell_game::HubUpdate {
    for _ in 0..cfg.items.len() {
        let current = cfg
            .items
            .iter()
            .find_map(|item| {
                find_label(hub, &item.label, SURFACE_H / 2.0, SURFACE_H).map(|_| item)
            })
            .expect("a queued item is displayed");
        let bin_label = &cfg.bins[current.bin];
        let (x, y) =
            find_label(hub, bin_label, 0.0, SURFACE_H / 2.0).expect("bin label in scene");
        let update = hub.pointer(PointerInput::Click { x, y });
        if !update.is_noop() {
            return update;
        }
    }
    panic!("sorting run never completed");
}

fn drive_survival(hub: &mut MissionHub<MemoryStore>) -> evocell_game::HubUpdate {
    for _ in 0..10_000 {
        // Chase the item closest to the paddle line.
        let target_x = hub
            .scene()
            .nodes
            .iter()
            .filter_map(|node| match node {
                SceneNode::Circle { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(x, _)| x);
        if let Some(x) = target_x {
            hub.pointer(PointerInput::Move { x, y: 0.0 });
        }
        let update = hub.tick(16.0);
        if !update.is_noop() {
            return update;
        }
    }
    panic!("survival run never completed");
}

fn drive_balance(hub: &mut MissionHub<MemoryStore>) -> evocell_game::HubUpdate {
    let fraction = hub
        .scene()
        .nodes
        .iter()
        .find_map(|node| match node {
            SceneNode::Gauge { fraction, .. } => Some(*fraction),
            _ => None,
        })
        .expect("environment gauge in scene");
    // The slider track spans the surface minus its margins.
    let x = 40.0 + fraction * (SURFACE_W - 80.0);
    let y = SURFACE_H * 0.6;
    hub.pointer(PointerInput::Down { x, y });
    let update = hub.pointer(PointerInput::Up { x, y });
    assert!(!update.is_noop(), "release commits the choice");
    update
}

#[test]
fn full_campaign_reaches_evolution_exactly_once() {
    let store = MemoryStore::default();
    let mut hub = MissionHub::new(Scenario::AnimalCell, store.clone(), 0xFACE).unwrap();
    hub.set_player("Explorer Lin");
    assert_eq!(hub.phase(), EnginePhase::Idle);

    let missions: Vec<_> = hub.missions().to_vec();
    let mut fired_thresholds = Vec::new();
    let mut evolution_count = 0;

    for mission in &missions {
        hub.launch(&mission.id).unwrap();
        assert_eq!(hub.active_mission(), Some(mission.id.as_str()));

        let update = match &mission.game {
            GameSpec::Charge(_) => drive_charge(&mut hub),
            GameSpec::Sequence(cfg) => drive_sequence(&mut hub, cfg),
            GameSpec::Sorting(cfg) => drive_sorting(&mut hub, cfg),
            GameSpec::Survival(_) => drive_survival(&mut hub),
            GameSpec::Balance(_) => drive_balance(&mut hub),
        };

        let result = update.completed.expect("run completed");
        assert!(result.success, "{} should pass", mission.id);
        let award = update.award.expect("award folded");
        assert!(award.accepted);
        assert_eq!(award.points_applied, mission.weight, "{}", mission.id);
        fired_thresholds.extend(award.thresholds_crossed.iter().copied());
        if award.evolution_started {
            evolution_count += 1;
        }
    }

    assert_eq!(hub.percent(), 100);
    assert_eq!(hub.phase(), EnginePhase::Complete);
    assert_eq!(evolution_count, 1, "terminal fires exactly once");
    assert_eq!(fired_thresholds, vec![30, 50, 80]);
    assert!(hub.session().terminal_fired());
    assert!(hub.session().evolution().is_some());
    assert_eq!(hub.session().log().len(), missions.len());
    assert_eq!(hub.session().player(), "Explorer Lin");

    // Every score landed in the persisted record.
    let record = store.record.borrow().clone().expect("persisted");
    assert_eq!(record.completed_count(), missions.len());
    assert!(record.total_score >= 99, "all runs scored at or near 100");

    // The fitness narrative agrees.
    let report = hub.fitness().unwrap();
    assert_eq!(report.verdict.to_string(), "thriving");
}

#[test]
fn cancelling_mid_run_never_leaks_into_the_session() {
    let mut hub = MissionHub::new(Scenario::AnimalCell, MemoryStore::default(), 7).unwrap();
    hub.launch("mito").unwrap();
    for _ in 0..5 {
        hub.pointer(PointerInput::Click { x: 320.0, y: 160.0 });
    }
    hub.cancel_active();

    // A new run starts clean; the torn-down one can no longer award.
    hub.launch("membrane").unwrap();
    assert_eq!(hub.session().points_awarded(), 0);
    assert!(hub.session().log().is_empty());
}

#[test]
fn flytrap_campaign_uses_its_own_weight_total() {
    let mut hub = MissionHub::new(Scenario::VenusFlytrap, MemoryStore::default(), 3).unwrap();
    assert_eq!(hub.session().max_points(), 96);
    hub.launch("chlor").unwrap();
    let update = drive_balance(&mut hub);
    let award = update.award.expect("award folded");
    assert_eq!(award.points_applied, 15);
    assert_eq!(award.percent, 16, "15 of 96 rounds to 16");
}
