use crate::distribution::std_normal::std_normal_quantile;
use crate::error::CtdesignErr;
use crate::util::error::InvalidParameterError;
use crate::util::validate::check_alpha_power;

/// (z_{1 - alpha/2}, z_{power}) for two-sided designs
pub(crate) fn two_sided_z(alpha: f64, power: f64) -> Result<(f64, f64), CtdesignErr> {
    check_alpha_power(alpha, power)?;
    Ok((
        std_normal_quantile(1.0 - alpha / 2.0)?,
        std_normal_quantile(power)?,
    ))
}

/// (z_{1 - alpha}, z_{power}) for one-sided designs
pub(crate) fn one_sided_z(alpha: f64, power: f64) -> Result<(f64, f64), CtdesignErr> {
    check_alpha_power(alpha, power)?;
    Ok((std_normal_quantile(1.0 - alpha)?, std_normal_quantile(power)?))
}

// Half of usize::MAX, so an arm total can always be added up
const MAX_SAMPLE_SIZE: f64 = (usize::MAX / 2) as f64;

/// Rounds a fractional sample size up. Tiny floating-point excess over an
/// integer (e.g. 63.000000000001) is not allowed to cost a whole patient.
/// Sizes too large to count (or not finite) are an error.
pub(crate) fn ceil_n(x: f64) -> Result<usize, CtdesignErr> {
    const SLACK: f64 = 1e-9;
    if !(x.is_finite() && x < MAX_SAMPLE_SIZE) {
        return Err(InvalidParameterError::SampleSizeTooLarge(x).into());
    }
    let rounded = x.round();
    if (x - rounded).abs() < SLACK {
        return Ok(rounded.max(1.0) as usize);
    }
    Ok(x.ceil().max(1.0) as usize)
}
