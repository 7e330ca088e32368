//----------------------------------------
// spending mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingFcn {
    /// Lan-DeMets O'Brien-Fleming type: 2 (1 - Phi(z_{1-alpha/2} / sqrt(t)))
    OBrienFleming,
    /// Equal alpha at every look (alpha / looks each), giving a flat boundary
    Pocock,
    Custom { cumulative_spend: Vec<f64> },
}

/// Cumulative alpha and two-sided critical values at each look
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaSpendingSchedule {
    pub information_fraction: Vec<f64>,
    pub alpha_spent: Vec<f64>,
    pub boundary: Vec<f64>,
}

impl AlphaSpendingSchedule {
    pub fn looks(&self) -> usize {
        self.information_fraction.len()
    }
}
