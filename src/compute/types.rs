//----------------------------------------
// compute mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::config::DefaultDesignParams;
use crate::error::CtdesignErr;
use crate::sample_size::{
    anova::sample_size_anova,
    binary::sample_size_proportion,
    continuous::sample_size_t_test,
    non_inferiority::{sample_size_non_inferiority, sample_size_non_inferiority_continuous},
    survival::sample_size_survival,
    types::{AnovaSampleSize, SampleSizeResult},
};

/// Variability assumed under a non-inferiority margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scale", rename_all = "snake_case")]
pub enum Variability {
    /// Binary endpoint with this common response rate
    ResponseRate { expected_rate: f64 },
    /// Continuous endpoint with this SD
    StandardDeviation { sigma: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Endpoint {
    Continuous {
        delta: f64,
        sigma: f64,
    },
    Binary {
        p_control: f64,
        p_treatment: f64,
    },
    TimeToEvent {
        hazard_ratio: f64,
        event_rate_control: f64,
        dropout_rate: f64,
    },
    NonInferiority {
        margin: f64,
        variability: Variability,
    },
    Anova {
        groups: usize,
        effect_size_f: f64,
    },
}

/// Endpoint plus error rates and allocation. For non-inferiority endpoints
/// `alpha` is one-sided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignSpecification {
    pub endpoint: Endpoint,
    pub alpha: f64,
    pub power: f64,
    /// n_treatment / n_control
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSampleSize {
    TwoArm(SampleSizeResult),
    MultiArm(AnovaSampleSize),
}

impl DesignSampleSize {
    pub fn total(&self) -> usize {
        match self {
            DesignSampleSize::TwoArm(ss) => ss.total,
            DesignSampleSize::MultiArm(ss) => ss.total,
        }
    }
}

impl DesignSpecification {
    /// alpha 0.05 (0.025 one-sided for non-inferiority), power 0.8, 1:1
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_defaults(endpoint, &DefaultDesignParams::default())
    }

    pub fn with_defaults(endpoint: Endpoint, defaults: &DefaultDesignParams) -> Self {
        let alpha = match endpoint {
            Endpoint::NonInferiority { .. } => defaults.non_inferiority_alpha,
            _ => defaults.alpha,
        };
        Self {
            endpoint,
            alpha,
            power: defaults.power,
            ratio: defaults.ratio,
        }
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Dispatches to the calculator for the endpoint family. ANOVA designs
    /// are balanced, so `ratio` does not apply to them.
    pub fn sample_size(&self) -> Result<DesignSampleSize, CtdesignErr> {
        let (alpha, power, ratio) = (self.alpha, self.power, self.ratio);
        let two_arm = match self.endpoint {
            Endpoint::Continuous { delta, sigma } => {
                sample_size_t_test(delta, sigma, alpha, power, ratio)?
            }
            Endpoint::Binary {
                p_control,
                p_treatment,
            } => sample_size_proportion(p_control, p_treatment, alpha, power, ratio)?,
            Endpoint::TimeToEvent {
                hazard_ratio,
                event_rate_control,
                dropout_rate,
            } => sample_size_survival(
                hazard_ratio,
                event_rate_control,
                dropout_rate,
                alpha,
                power,
                ratio,
            )?,
            Endpoint::NonInferiority {
                margin,
                variability: Variability::ResponseRate { expected_rate },
            } => sample_size_non_inferiority(expected_rate, margin, alpha, power, ratio)?,
            Endpoint::NonInferiority {
                margin,
                variability: Variability::StandardDeviation { sigma },
            } => sample_size_non_inferiority_continuous(sigma, margin, alpha, power, ratio)?,
            Endpoint::Anova {
                groups,
                effect_size_f,
            } => {
                return Ok(DesignSampleSize::MultiArm(sample_size_anova(
                    groups,
                    effect_size_f,
                    alpha,
                    power,
                )?));
            }
        };
        Ok(DesignSampleSize::TwoArm(two_arm))
    }
}
