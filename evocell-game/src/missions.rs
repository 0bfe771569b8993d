//! Scenario catalogs and mission definitions.
//!
//! Each scenario defines the organelle missions, their adaptation weights,
//! and the mini-game each one launches. Catalogs are immutable and
//! validated into a [`MissionSet`] at startup.

use serde::{Deserialize, Serialize};

use crate::EngineError;
use crate::minigames::{
    BalanceCfg, ChargeCfg, SequenceCfg, SortItem, SortingCfg, SurvivalCfg, SurvivalMode,
};

/// Which cell the player is adapting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    AnimalCell,
    VenusFlytrap,
}

impl Scenario {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AnimalCell => "Animal Cell",
            Self::VenusFlytrap => "Venus Flytrap",
        }
    }

    /// The scenario's full mission catalog, in display order.
    #[must_use]
    pub fn catalog(self) -> Vec<MissionDefinition> {
        match self {
            Self::AnimalCell => animal_catalog(),
            Self::VenusFlytrap => flytrap_catalog(),
        }
    }
}

/// How a mission's mini-game is constructed and tuned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameSpec {
    Charge(ChargeCfg),
    Sequence(SequenceCfg),
    Sorting(SortingCfg),
    Survival(SurvivalCfg),
    Balance(BalanceCfg),
}

/// One organelle mission. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDefinition {
    pub id: String,
    pub title: String,
    pub hint: String,
    /// Adaptation points granted on a successful completion.
    pub weight: u32,
    pub game: GameSpec,
}

fn mission(
    id: &str,
    title: &str,
    hint: &str,
    weight: u32,
    game: GameSpec,
) -> MissionDefinition {
    MissionDefinition {
        id: id.to_string(),
        title: title.to_string(),
        hint: hint.to_string(),
        weight,
        game,
    }
}

fn sort_items(entries: &[(&str, usize)]) -> Vec<SortItem> {
    entries
        .iter()
        .map(|(label, bin)| SortItem {
            label: (*label).to_string(),
            bin: *bin,
        })
        .collect()
}

fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|entry| (*entry).to_string()).collect()
}

fn animal_catalog() -> Vec<MissionDefinition> {
    vec![
        mission(
            "nucleus",
            "Nucleus",
            "Match the DNA control segments in order to activate gene expression.",
            12,
            GameSpec::Sequence(SequenceCfg {
                items: strings(&["promoter", "coding region", "terminator"]),
                ..SequenceCfg::default()
            }),
        ),
        mission(
            "mito",
            "Mitochondria",
            "Pulse the core rapidly to charge energy output.",
            12,
            GameSpec::Charge(ChargeCfg::default()),
        ),
        mission(
            "ribosome",
            "Ribosome",
            "Chain the amino acids in the right order.",
            10,
            GameSpec::Sequence(SequenceCfg {
                items: strings(&["Met", "Gly", "Ser", "Lys"]),
                ..SequenceCfg::default()
            }),
        ),
        mission(
            "er",
            "Endoplasmic Reticulum",
            "Route each cargo packet to the right exit.",
            8,
            GameSpec::Sorting(SortingCfg {
                bins: strings(&["to Golgi", "to cytosol"]),
                items: sort_items(&[
                    ("secretory protein", 0),
                    ("membrane lipid", 1),
                    ("export enzyme", 0),
                    ("sterol", 1),
                ]),
                ..SortingCfg::default()
            }),
        ),
        mission(
            "golgi",
            "Golgi",
            "Sort the molecules into their destination bins.",
            8,
            GameSpec::Sorting(SortingCfg {
                bins: strings(&["lysosome", "membrane", "secretion"]),
                items: sort_items(&[
                    ("hydrolase", 0),
                    ("glycoprotein", 1),
                    ("hormone", 2),
                    ("acid enzyme", 0),
                ]),
                ..SortingCfg::default()
            }),
        ),
        mission(
            "lysosome",
            "Lysosome",
            "Sweep up the waste before it builds up.",
            10,
            GameSpec::Survival(SurvivalCfg {
                mode: SurvivalMode::Catch,
                ..SurvivalCfg::default()
            }),
        ),
        mission(
            "vacuole",
            "Vacuole",
            "Catch the falling nutrient droplets.",
            10,
            GameSpec::Survival(SurvivalCfg {
                mode: SurvivalMode::Catch,
                ..SurvivalCfg::default()
            }),
        ),
        mission(
            "membrane",
            "Cell Membrane",
            "Slide the shield to block incoming toxins.",
            10,
            GameSpec::Survival(SurvivalCfg {
                mode: SurvivalMode::Block,
                ..SurvivalCfg::default()
            }),
        ),
        mission(
            "cytoskel",
            "Cytoskeleton",
            "Assemble the frame in a stable order.",
            10,
            GameSpec::Sequence(SequenceCfg {
                items: strings(&["base node", "side strut", "cross brace", "top cap"]),
                ..SequenceCfg::default()
            }),
        ),
        mission(
            "perox",
            "Peroxisome",
            "Balance the reactive particle level against the oxidative load.",
            10,
            GameSpec::Balance(BalanceCfg {
                parameter: "oxidative load".to_string(),
                ..BalanceCfg::default()
            }),
        ),
    ]
}

fn flytrap_catalog() -> Vec<MissionDefinition> {
    vec![
        mission(
            "nucleus",
            "Nucleus",
            "Tune the gene switches to match the trap response.",
            11,
            GameSpec::Balance(BalanceCfg {
                parameter: "prey signal".to_string(),
                ..BalanceCfg::default()
            }),
        ),
        mission(
            "chlor",
            "Chloroplast",
            "Align the chlorophyll panels with the incoming sunlight.",
            15,
            GameSpec::Balance(BalanceCfg {
                parameter: "sunlight angle".to_string(),
                error_scale: 2.5,
                ..BalanceCfg::default()
            }),
        ),
        mission(
            "rib",
            "Ribosome",
            "Assemble trap-trigger proteins quickly.",
            9,
            GameSpec::Charge(ChargeCfg {
                target_pulses: 24,
                time_budget_ms: 7_000.0,
                ..ChargeCfg::default()
            }),
        ),
        mission(
            "er",
            "Endoplasmic Reticulum",
            "Route the digestive enzymes where they are needed.",
            8,
            GameSpec::Sorting(SortingCfg {
                bins: strings(&["trap lobe", "storage"]),
                items: sort_items(&[
                    ("protease", 0),
                    ("reserve sugar", 1),
                    ("chitinase", 0),
                    ("starch grain", 1),
                ]),
                ..SortingCfg::default()
            }),
        ),
        mission(
            "golgi",
            "Golgi",
            "Package the enzymes into rapid-release vesicles.",
            8,
            GameSpec::Sorting(SortingCfg {
                bins: strings(&["rapid release", "slow release"]),
                items: sort_items(&[
                    ("trigger enzyme", 0),
                    ("maintenance enzyme", 1),
                    ("digestive burst", 0),
                    ("repair protein", 1),
                ]),
                ..SortingCfg::default()
            }),
        ),
        mission(
            "vacuole",
            "Vacuole",
            "Store the captured nutrients for the months ahead.",
            12,
            GameSpec::Survival(SurvivalCfg {
                mode: SurvivalMode::Catch,
                spawn_count: 14,
                ..SurvivalCfg::default()
            }),
        ),
        mission(
            "membrane",
            "Membrane",
            "Match the ion channel opening to the touch stimulus.",
            8,
            GameSpec::Balance(BalanceCfg {
                parameter: "touch stimulus".to_string(),
                ..BalanceCfg::default()
            }),
        ),
        mission(
            "cellwall",
            "Cell Wall",
            "Reinforce the trap edges so they hold the prey.",
            9,
            GameSpec::Charge(ChargeCfg {
                target_pulses: 26,
                ..ChargeCfg::default()
            }),
        ),
        mission(
            "perox",
            "Peroxisome",
            "Intercept reactive oxygen before it damages the trap.",
            6,
            GameSpec::Survival(SurvivalCfg {
                mode: SurvivalMode::Block,
                spawn_count: 10,
                ..SurvivalCfg::default()
            }),
        ),
        mission(
            "cyto",
            "Cytoskeleton",
            "Contract and relax rapidly to snap the trap shut.",
            10,
            GameSpec::Charge(ChargeCfg {
                target_pulses: 36,
                time_budget_ms: 9_000.0,
                ..ChargeCfg::default()
            }),
        ),
    ]
}

/// A validated, immutable mission set for one scenario.
#[derive(Debug, Clone)]
pub struct MissionSet {
    scenario: Scenario,
    missions: Vec<MissionDefinition>,
    max_points: u32,
}

impl MissionSet {
    /// Validate a catalog: non-empty, unique ids, positive weights.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] describing the first configuration
    /// problem found; these are programming errors and fail fast at setup.
    pub fn new(scenario: Scenario, missions: Vec<MissionDefinition>) -> Result<Self, EngineError> {
        if missions.is_empty() {
            return Err(EngineError::EmptyMissionSet);
        }
        let mut max_points: u32 = 0;
        for (index, mission) in missions.iter().enumerate() {
            if mission.weight == 0 {
                return Err(EngineError::ZeroWeight {
                    id: mission.id.clone(),
                });
            }
            if missions[..index].iter().any(|prior| prior.id == mission.id) {
                return Err(EngineError::DuplicateMission {
                    id: mission.id.clone(),
                });
            }
            max_points = max_points.saturating_add(mission.weight);
        }
        Ok(Self {
            scenario,
            missions,
            max_points,
        })
    }

    /// Build the validated set for a scenario's built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the built-in catalog is malformed.
    pub fn for_scenario(scenario: Scenario) -> Result<Self, EngineError> {
        Self::new(scenario, scenario.catalog())
    }

    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    #[must_use]
    pub fn missions(&self) -> &[MissionDefinition] {
        &self.missions
    }

    #[must_use]
    pub fn mission(&self, id: &str) -> Option<&MissionDefinition> {
        self.missions.iter().find(|mission| mission.id == id)
    }

    /// Sum of all mission weights; the adaptation meter's denominator.
    #[must_use]
    pub const fn max_points(&self) -> u32 {
        self.max_points
    }
}
