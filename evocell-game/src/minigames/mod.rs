//! Concrete mini-game state machines.
//!
//! Five interaction families cover every organelle mission; a mission picks
//! a family and tunes it through the family's config struct embedded in its
//! [`crate::missions::GameSpec`].

pub mod balance;
pub mod charge;
pub mod sequence;
pub mod sorting;
pub mod survival;

pub use balance::{BalanceCfg, BalanceGame};
pub use charge::{ChargeCfg, ChargeGame};
pub use sequence::{SequenceCfg, SequenceGame};
pub use sorting::{SortItem, SortingCfg, SortingGame};
pub use survival::{SurvivalCfg, SurvivalGame, SurvivalMode};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::minigame::{MissionContext, SurfaceInfo};
    use crate::missions::{GameSpec, MissionDefinition};
    use crate::minigames::ChargeCfg;

    /// Context for driving a game directly in unit tests.
    pub(crate) fn fixture_ctx(seed: u64) -> MissionContext {
        MissionContext {
            mission: MissionDefinition {
                id: "fixture".to_string(),
                title: "Fixture".to_string(),
                hint: String::new(),
                weight: 10,
                game: GameSpec::Charge(ChargeCfg::default()),
            },
            surface: SurfaceInfo::default(),
            seed,
        }
    }
}
