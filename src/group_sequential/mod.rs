//----------------------------------------
// group sequential mod
//----------------------------------------
pub mod simulate;
pub mod types;

pub use simulate::simulate_group_sequential;
pub use types::{GroupSequentialDesign, GroupSequentialSettings, StageStatistic};
