use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bayesian::prior::PriorDistribution;
use crate::sample_size::types::SampleSizeResult;

/// Normal prior on one arm's mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmPrior {
    pub mean: f64,
    pub sd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesianSettings {
    /// Largest per-arm sample size the search will try
    pub max_n: usize,
}

impl Default for BayesianSettings {
    fn default() -> Self {
        Self { max_n: 10_000 }
    }
}

/// The search ran out of sample sizes before the posterior probability
/// reached the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NonConvergenceWarning {
    pub max_n: usize,
    pub posterior_probability: f64,
    pub threshold: f64,
}

impl fmt::Display for NonConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "posterior probability {:.4} still below threshold {} at the cap of {} per arm",
            self.posterior_probability, self.threshold, self.max_n
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SearchStatus {
    Converged,
    Capped(NonConvergenceWarning),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayesianDesign {
    pub sample_size: SampleSizeResult,
    /// P(treatment > control) at the reported sample size
    pub posterior_probability: f64,
    /// Posterior of treatment minus control at the reported sample size
    pub posterior_difference: PriorDistribution,
    pub status: SearchStatus,
}

impl BayesianDesign {
    pub fn converged(&self) -> bool {
        matches!(self.status, SearchStatus::Converged)
    }

    pub fn warning(&self) -> Option<&NonConvergenceWarning> {
        match &self.status {
            SearchStatus::Converged => None,
            SearchStatus::Capped(w) => Some(w),
        }
    }
}
