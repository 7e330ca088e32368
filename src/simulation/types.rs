//----------------------------------------
// simulation types
//----------------------------------------
use serde::{Deserialize, Serialize};

/// Operating characteristics estimated under one true effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// True effect the replications were generated under
    pub scenario: f64,
    pub simulated_power: f64,
    pub expected_sample_size: Option<f64>,
    pub simulations: usize,
}
