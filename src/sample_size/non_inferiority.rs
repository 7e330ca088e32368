use crate::error::CtdesignErr;
use crate::sample_size::critical::{ceil_n, one_sided_z};
use crate::sample_size::types::SampleSizeResult;
use crate::util::validate::{check_effect, check_positive, check_proportion};

// n_control = (z_a + z_b)^2 var (1 + 1/ratio) / margin^2 with one-sided z_a
fn non_inferiority_n(
    variance: f64,
    margin: f64,
    alpha: f64,
    power: f64,
    ratio: f64,
) -> Result<SampleSizeResult, CtdesignErr> {
    check_effect("non-inferiority margin", margin)?;
    check_positive("allocation ratio", ratio)?;
    let (z_a, z_b) = one_sided_z(alpha, power)?;

    let n_control = ceil_n((z_a + z_b).powi(2) * variance * (1.0 + 1.0 / ratio) / margin.powi(2))?;
    let n_treatment = ceil_n(n_control as f64 * ratio)?;

    tracing::debug!(variance, margin, alpha, power, n_control, n_treatment, "non-inferiority sample size");
    Ok(SampleSizeResult::new(n_control, n_treatment))
}

/// Non-inferiority on a binary endpoint with common expected response rate
/// `expected_rate`; `alpha` is one-sided (conventionally 0.025)
pub fn sample_size_non_inferiority(
    expected_rate: f64,
    margin: f64,
    alpha: f64,
    power: f64,
    ratio: f64,
) -> Result<SampleSizeResult, CtdesignErr> {
    check_proportion("expected rate", expected_rate)?;
    non_inferiority_n(
        expected_rate * (1.0 - expected_rate),
        margin,
        alpha,
        power,
        ratio,
    )
}

/// Non-inferiority on a continuous endpoint; sigma^2 stands in for p(1 - p)
pub fn sample_size_non_inferiority_continuous(
    sigma: f64,
    margin: f64,
    alpha: f64,
    power: f64,
    ratio: f64,
) -> Result<SampleSizeResult, CtdesignErr> {
    check_positive("sigma", sigma)?;
    non_inferiority_n(sigma.powi(2), margin, alpha, power, ratio)
}
