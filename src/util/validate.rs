use crate::error::CtdesignErr;
use crate::util::error::InvalidParameterError;

// Every calculator runs its inputs through these before touching a formula,
// so callers always see the parameter error rather than a NaN.

pub(crate) fn check_alpha(alpha: f64) -> Result<(), CtdesignErr> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(InvalidParameterError::Alpha(alpha).into());
    }
    Ok(())
}

pub(crate) fn check_power(power: f64) -> Result<(), CtdesignErr> {
    if !(power > 0.0 && power < 1.0) {
        return Err(InvalidParameterError::Power(power).into());
    }
    Ok(())
}

pub(crate) fn check_alpha_power(alpha: f64, power: f64) -> Result<(), CtdesignErr> {
    check_alpha(alpha)?;
    check_power(power)
}

/// Strictly positive and finite
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), CtdesignErr> {
    if !value.is_finite() {
        return Err(InvalidParameterError::NotFinite { name, value }.into());
    }
    if value <= 0.0 {
        return Err(InvalidParameterError::NonPositive { name, value }.into());
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), CtdesignErr> {
    if !value.is_finite() {
        return Err(InvalidParameterError::NotFinite { name, value }.into());
    }
    if value < 0.0 {
        return Err(InvalidParameterError::Negative { name, value }.into());
    }
    Ok(())
}

/// Open unit interval, for proportions and probabilities
pub(crate) fn check_proportion(name: &'static str, value: f64) -> Result<(), CtdesignErr> {
    if !(value > 0.0 && value < 1.0) {
        return Err(InvalidParameterError::Proportion { name, value }.into());
    }
    Ok(())
}

/// Half-open [0, 1), for dropout rates
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), CtdesignErr> {
    if !(0.0..1.0).contains(&value) {
        return Err(InvalidParameterError::Rate { name, value }.into());
    }
    Ok(())
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), CtdesignErr> {
    if !value.is_finite() {
        return Err(InvalidParameterError::NotFinite { name, value }.into());
    }
    Ok(())
}

/// Finite and nonzero; every design formula divides by the effect
pub(crate) fn check_effect(name: &'static str, value: f64) -> Result<(), CtdesignErr> {
    check_finite(name, value)?;
    if value == 0.0 {
        return Err(InvalidParameterError::ZeroEffect { name }.into());
    }
    Ok(())
}

/// `lower <= upper` for a pair of thresholds
pub(crate) fn check_ordered(
    (lower_name, lower): (&'static str, f64),
    (upper_name, upper): (&'static str, f64),
) -> Result<(), CtdesignErr> {
    if lower > upper {
        return Err(InvalidParameterError::Ordering {
            lower_name,
            lower,
            upper_name,
            upper,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn check_simulations(simulations: usize) -> Result<(), CtdesignErr> {
    if simulations == 0 {
        return Err(InvalidParameterError::NoSimulations.into());
    }
    Ok(())
}
