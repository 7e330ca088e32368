use serde::{Deserialize, Serialize};

use crate::distribution::{beta_pdf, log_normal_pdf, std_normal::std_normal_pdf};
use crate::error::CtdesignErr;
use crate::util::validate::check_positive;

/// Prior or posterior distribution for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum PriorDistribution {
    Normal { mean: f64, variance: f64 },
    Beta { alpha: f64, beta: f64 },
    LogNormal { log_mean: f64, log_variance: f64 },
}

impl PriorDistribution {
    pub fn normal(mean: f64, variance: f64) -> Result<Self, CtdesignErr> {
        check_positive("variance", variance)?;
        Ok(PriorDistribution::Normal { mean, variance })
    }

    pub fn beta(alpha: f64, beta: f64) -> Result<Self, CtdesignErr> {
        check_positive("beta shape alpha", alpha)?;
        check_positive("beta shape beta", beta)?;
        Ok(PriorDistribution::Beta { alpha, beta })
    }

    pub fn log_normal(log_mean: f64, log_variance: f64) -> Result<Self, CtdesignErr> {
        check_positive("log variance", log_variance)?;
        Ok(PriorDistribution::LogNormal {
            log_mean,
            log_variance,
        })
    }

    pub fn mean(&self) -> f64 {
        match *self {
            PriorDistribution::Normal { mean, .. } => mean,
            PriorDistribution::Beta { alpha, beta } => alpha / (alpha + beta),
            PriorDistribution::LogNormal {
                log_mean,
                log_variance,
            } => (log_mean + log_variance / 2.0).exp(),
        }
    }

    /// Mode; for a Beta with a shape <= 1 the density peaks at a boundary
    pub fn mode(&self) -> f64 {
        match *self {
            PriorDistribution::Normal { mean, .. } => mean,
            PriorDistribution::Beta { alpha, beta } => {
                if alpha > 1.0 && beta > 1.0 {
                    (alpha - 1.0) / (alpha + beta - 2.0)
                } else if alpha <= 1.0 && beta > 1.0 {
                    0.0
                } else if alpha > 1.0 && beta <= 1.0 {
                    1.0
                } else {
                    // U-shaped or uniform; no unique interior mode
                    0.5
                }
            }
            PriorDistribution::LogNormal {
                log_mean,
                log_variance,
            } => (log_mean - log_variance).exp(),
        }
    }

    pub fn variance(&self) -> f64 {
        match *self {
            PriorDistribution::Normal { variance, .. } => variance,
            PriorDistribution::Beta { alpha, beta } => {
                let s = alpha + beta;
                alpha * beta / (s * s * (s + 1.0))
            }
            PriorDistribution::LogNormal {
                log_mean,
                log_variance,
            } => (log_variance.exp() - 1.0) * (2.0 * log_mean + log_variance).exp(),
        }
    }

    pub fn density(&self, x: f64) -> Result<f64, CtdesignErr> {
        match *self {
            PriorDistribution::Normal { mean, variance } => {
                let sd = variance.sqrt();
                Ok(std_normal_pdf((x - mean) / sd) / sd)
            }
            PriorDistribution::Beta { alpha, beta } => beta_pdf(x, alpha, beta),
            PriorDistribution::LogNormal {
                log_mean,
                log_variance,
            } => log_normal_pdf(x, log_mean, log_variance.sqrt()),
        }
    }

    /// `points` evenly spaced (x, density) pairs covering the bulk of the
    /// distribution, for plotting a density histogram
    pub fn density_samples(&self, points: usize) -> Result<Vec<(f64, f64)>, CtdesignErr> {
        if points == 0 {
            return Ok(vec![]);
        }
        let (lo, hi) = match *self {
            PriorDistribution::Normal { mean, variance } => {
                let sd = variance.sqrt();
                (mean - 4.0 * sd, mean + 4.0 * sd)
            }
            PriorDistribution::Beta { .. } => (0.0, 1.0),
            PriorDistribution::LogNormal {
                log_mean,
                log_variance,
            } => (0.0, (log_mean + 4.0 * log_variance.sqrt()).exp()),
        };
        // Bin midpoints, so Beta and log-normal never hit their boundary
        let width = (hi - lo) / points as f64;
        (0..points)
            .map(|i| {
                let x = lo + (i as f64 + 0.5) * width;
                Ok((x, self.density(x)?))
            })
            .collect()
    }
}
