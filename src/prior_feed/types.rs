//----------------------------------------
// prior feed types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::bayesian::prior::PriorDistribution;
use crate::error::CtdesignErr;

/// What a historical-data source is asked about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorQuery {
    pub indication: String,
    pub phase: Option<String>,
    pub endpoint: String,
}

impl PriorQuery {
    pub fn new(indication: &str, endpoint: &str) -> Self {
        Self {
            indication: indication.to_string(),
            phase: None,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn with_phase(mut self, phase: &str) -> Self {
        self.phase = Some(phase.to_string());
        self
    }
}

/// Summary of comparable past trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoricalEstimate {
    Continuous { mean: f64, sd: f64 },
    Binary { proportion: f64, events: u64, total: u64 },
    HazardRatio { log_mean: f64, log_sd: f64 },
}

impl HistoricalEstimate {
    /// Point estimate on the natural scale: the mean, the proportion, or
    /// the hazard ratio exp(log_mean)
    pub fn point_estimate(&self) -> f64 {
        match *self {
            HistoricalEstimate::Continuous { mean, .. } => mean,
            HistoricalEstimate::Binary { proportion, .. } => proportion,
            HistoricalEstimate::HazardRatio { log_mean, .. } => log_mean.exp(),
        }
    }

    /// Per-patient standard deviation: the historical sd, or sqrt(p(1 - p))
    /// for a proportion. A hazard ratio carries no per-patient spread.
    pub fn variability(&self) -> Option<f64> {
        match *self {
            HistoricalEstimate::Continuous { sd, .. } => Some(sd),
            HistoricalEstimate::Binary { proportion, .. } => Some((proportion * (1.0 - proportion)).sqrt()),
            HistoricalEstimate::HazardRatio { .. } => None,
        }
    }

    /// Binary counts become Beta(events + 1, total - events + 1), a uniform
    /// prior updated with the historical data
    pub fn to_prior(&self) -> Result<PriorDistribution, CtdesignErr> {
        match *self {
            HistoricalEstimate::Continuous { mean, sd } => PriorDistribution::normal(mean, sd.powi(2)),
            HistoricalEstimate::Binary { events, total, .. } => PriorDistribution::beta(
                events as f64 + 1.0,
                total.saturating_sub(events) as f64 + 1.0,
            ),
            HistoricalEstimate::HazardRatio { log_mean, log_sd } => {
                PriorDistribution::log_normal(log_mean, log_sd.powi(2))
            }
        }
    }
}
