//----------------------------------------
// adaptive mod
//----------------------------------------
pub mod conditional_power;
pub mod simulate;
pub mod types;

pub use conditional_power::conditional_power;
pub use simulate::simulate_adaptive;
pub use types::{
    AdaptiveRule, AdaptiveScenarioResult, AdaptiveSettings, ConditionalPowerSettings,
    FinalStatistic, PromisingZoneSettings,
};
