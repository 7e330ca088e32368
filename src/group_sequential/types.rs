//----------------------------------------
// group sequential types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::sample_size::types::SampleSizeResult;
use crate::simulation::types::SimulationResult;
use crate::spending::types::AlphaSpendingSchedule;

/// Statistic compared with the boundary at each look
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatistic {
    /// Statistic from the newest stage alone
    #[default]
    Incremental,
    /// sqrt(n)-weighted combination of all stages so far
    Cumulative,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSequentialSettings {
    pub simulations: usize,
    /// Maximum N is the fixed-design N inflated by this fraction
    pub max_inflation: f64,
    pub stage_statistic: StageStatistic,
    /// Also estimate the type I error with a zero true effect
    pub simulate_null: bool,
}

impl Default for GroupSequentialSettings {
    fn default() -> Self {
        Self {
            simulations: 10_000,
            max_inflation: 0.10,
            stage_statistic: StageStatistic::Incremental,
            simulate_null: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSequentialDesign {
    /// Single-look design the maximum N is inflated from
    pub fixed_sample_size: SampleSizeResult,
    pub max_n_per_arm: usize,
    /// Per-arm patients enrolled by each look
    pub cumulative_n: Vec<usize>,
    pub schedule: AlphaSpendingSchedule,
    /// Under the expected effect; expected sample size counts both arms
    pub result: SimulationResult,
    pub null_result: Option<SimulationResult>,
    /// Fraction of replications rejecting at each look
    pub stopping_probabilities: Vec<f64>,
}
