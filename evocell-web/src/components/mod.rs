pub mod evolution;
pub mod log_panel;
pub mod meter;
pub mod mission_list;
pub mod stage;

pub use evolution::EvolutionOverlay;
pub use log_panel::LogPanel;
pub use meter::Meter;
pub use mission_list::{MissionList, MissionView};
pub use stage::Stage;
