use crate::distribution::std_normal::{std_normal_cdf, std_normal_quantile};
use crate::error::CtdesignErr;
use crate::util::validate::{check_alpha, check_finite, check_positive};

/// Probability of a two-sided rejection at the planned per-arm N if the
/// interim trend continues.
///
/// With z1 the interim statistic at information fraction
/// t = interim_n / planned_n, this is Phi((|z1| / sqrt(t) - z_{1-alpha/2}) / sqrt(1 - t)).
/// Once no patients remain the answer is 0 or 1.
pub fn conditional_power(
    interim_effect: f64,
    interim_n: usize,
    planned_n: usize,
    sigma: f64,
    alpha: f64,
) -> Result<f64, CtdesignErr> {
    check_finite("interim effect", interim_effect)?;
    check_positive("interim sample size", interim_n as f64)?;
    check_positive("planned sample size", planned_n as f64)?;
    check_positive("sigma", sigma)?;
    check_alpha(alpha)?;

    let z_alpha = std_normal_quantile(1.0 - alpha / 2.0)?;
    let z_interim = interim_effect / (sigma * (2.0 / interim_n as f64).sqrt());

    if interim_n >= planned_n {
        return Ok(if z_interim.abs() > z_alpha { 1.0 } else { 0.0 });
    }
    let t = interim_n as f64 / planned_n as f64;
    Ok(std_normal_cdf(
        (z_interim.abs() / t.sqrt() - z_alpha) / (1.0 - t).sqrt(),
    ))
}
