use serde::{Deserialize, Serialize};

/// Per-arm and total sample size of a two-arm design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSizeResult {
    pub n_control: usize,
    pub n_treatment: usize,
    pub total: usize,
    /// Only set for time-to-event designs
    pub required_events: Option<usize>,
}

impl SampleSizeResult {
    pub fn new(n_control: usize, n_treatment: usize) -> Self {
        Self {
            n_control,
            n_treatment,
            total: n_control + n_treatment,
            required_events: None,
        }
    }

    pub fn with_events(self, required_events: usize) -> Self {
        Self {
            required_events: Some(required_events),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerResult(pub f64);

impl PowerResult {
    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnovaSampleSize {
    pub n_per_group: usize,
    pub groups: usize,
    pub total: usize,
}
