use crate::distribution::std_normal::{std_normal_cdf, std_normal_quantile};
use crate::error::CtdesignErr;
use crate::sample_size::critical::{ceil_n, two_sided_z};
use crate::sample_size::types::{PowerResult, SampleSizeResult};
use crate::util::validate::{check_alpha, check_effect, check_finite, check_positive};

/// Two-sample comparison of means (normal approximation to the t-test).
///
/// n_control = (1 + 1/ratio) sigma^2 (z_a + z_b)^2 / delta^2, rounded up;
/// n_treatment = ceil(n_control * ratio).
pub fn sample_size_t_test(
    delta: f64,
    sigma: f64,
    alpha: f64,
    power: f64,
    ratio: f64,
) -> Result<SampleSizeResult, CtdesignErr> {
    check_effect("delta", delta)?;
    check_positive("sigma", sigma)?;
    check_positive("allocation ratio", ratio)?;
    let (z_a, z_b) = two_sided_z(alpha, power)?;

    let n_control = ceil_n(
        (1.0 + 1.0 / ratio) * sigma.powi(2) * (z_a + z_b).powi(2) / delta.powi(2),
    )?;
    let n_treatment = ceil_n(n_control as f64 * ratio)?;

    tracing::debug!(delta, sigma, alpha, power, ratio, n_control, n_treatment, "t-test sample size");
    Ok(SampleSizeResult::new(n_control, n_treatment))
}

/// Two-sided power of the two-sample comparison at group sizes n1, n2
pub fn power_t_test(
    n1: usize,
    n2: usize,
    delta: f64,
    sigma: f64,
    alpha: f64,
) -> Result<PowerResult, CtdesignErr> {
    check_alpha(alpha)?;
    check_positive("sigma", sigma)?;
    check_positive("n1", n1 as f64)?;
    check_positive("n2", n2 as f64)?;
    check_finite("delta", delta)?;
    let z_a = std_normal_quantile(1.0 - alpha / 2.0)?;

    let effect = delta / (sigma * (1.0 / n1 as f64 + 1.0 / n2 as f64).sqrt());
    Ok(PowerResult(
        std_normal_cdf(effect - z_a) + std_normal_cdf(-effect - z_a),
    ))
}
