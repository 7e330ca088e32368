use std::f64::consts::PI;

use crate::distribution::error::DomainError;
use crate::error::CtdesignErr;

// Lanczos approximation, g = 7
const LANCZOS_G: f64 = 7.0;
#[allow(clippy::excessive_precision)]
const LANCZOS_COEFFS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// ln(Gamma(x)) for x > 0
pub fn log_gamma(x: f64) -> Result<f64, CtdesignErr> {
    if !(x > 0.0) || !x.is_finite() {
        return Err(DomainError::NonPositiveArgument {
            fcn: "log gamma",
            value: x,
        }
        .into());
    }
    Ok(log_gamma_unchecked(x))
}

fn log_gamma_unchecked(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection: Gamma(x) Gamma(1 - x) = pi / sin(pi x); sin(pi x) > 0 on (0, 0.5)
        return (PI / (PI * x).sin()).ln() - log_gamma_unchecked(1.0 - x);
    }
    let x = x - 1.0;
    let series = LANCZOS_COEFFS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS_COEFFS[0], |acc, (i, c)| acc + c / (x + (i as f64) + 1.0));
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

pub fn log_beta(a: f64, b: f64) -> Result<f64, CtdesignErr> {
    Ok(log_gamma(a)? + log_gamma(b)? - log_gamma(a + b)?)
}

/// Beta(a, b) density. Evaluated on the log scale so large shape parameters
/// don't overflow; zero outside (0, 1).
pub fn beta_pdf(x: f64, a: f64, b: f64) -> Result<f64, CtdesignErr> {
    let log_b = log_beta(a, b)?;
    if !(x > 0.0 && x < 1.0) {
        return Ok(0.0);
    }
    Ok(((a - 1.0) * x.ln() + (b - 1.0) * (1.0 - x).ln() - log_b).exp())
}

/// Density of a log-normal whose logarithm is N(log_mean, log_sd^2)
pub fn log_normal_pdf(x: f64, log_mean: f64, log_sd: f64) -> Result<f64, CtdesignErr> {
    if !(log_sd > 0.0) {
        return Err(DomainError::NonPositiveScale(log_sd).into());
    }
    if x <= 0.0 {
        return Ok(0.0);
    }
    let z = (x.ln() - log_mean) / log_sd;
    Ok((-0.5 * z * z).exp() / (x * log_sd * (2.0 * PI).sqrt()))
}
