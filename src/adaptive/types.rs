//----------------------------------------
// adaptive types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::simulation::types::SimulationResult;

/// Sample size re-estimation rule applied at the interim analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveRule {
    PromisingZone,
    ConditionalPower,
}

/// How the two stages are combined for the final test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatistic {
    /// z statistic of all patients, as if the sample size had been fixed
    #[default]
    Pooled,
    /// Stage z statistics weighted by the planned information fractions
    InverseNormal,
}

/// Interim |z| zones; N is increased only in [lower, upper)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromisingZoneSettings {
    pub lower: f64,
    pub upper: f64,
    /// Fractional increase of the planned N in the promising zone
    pub increase: f64,
}

impl Default for PromisingZoneSettings {
    fn default() -> Self {
        Self {
            lower: 0.5,
            upper: 1.5,
            increase: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalPowerSettings {
    /// Stop for futility below this conditional power
    pub futility: f64,
    /// No change at or above this conditional power
    pub favorable: f64,
    /// Re-estimated N is capped at this multiple of the planned N
    pub max_multiplier: f64,
}

impl Default for ConditionalPowerSettings {
    fn default() -> Self {
        Self {
            futility: 0.3,
            favorable: 0.8,
            max_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveSettings {
    pub simulations: usize,
    /// True effects simulated, as multiples of the planning effect
    pub scenario_multipliers: Vec<f64>,
    /// Share of the planned per-arm N observed at the interim
    pub interim_fraction: f64,
    pub promising_zone: PromisingZoneSettings,
    pub conditional_power: ConditionalPowerSettings,
    pub final_statistic: FinalStatistic,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            simulations: 1_000,
            scenario_multipliers: vec![0.0, 0.5, 1.0, 1.5],
            interim_fraction: 0.5,
            promising_zone: PromisingZoneSettings::default(),
            conditional_power: ConditionalPowerSettings::default(),
            final_statistic: FinalStatistic::Pooled,
        }
    }
}

/// One true-effect scenario; expected sample size counts both arms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveScenarioResult {
    pub result: SimulationResult,
    pub fraction_increased: f64,
    pub fraction_futility: f64,
}
