use crate::distribution::std_normal::{std_normal_cdf, std_normal_quantile};
use crate::error::CtdesignErr;
use crate::sample_size::critical::{ceil_n, two_sided_z};
use crate::sample_size::types::{PowerResult, SampleSizeResult};
use crate::util::validate::{check_alpha, check_effect, check_positive, check_rate};
use crate::util::error::InvalidParameterError;

/// Log-rank design.
///
/// Events needed: E = (z_a + z_b)^2 (1 + ratio) / (ratio ln(HR)^2).
/// Patients: E divided by the allocation-weighted event probability
/// w = (rate_ctrl + ratio rate_ctrl HR) / (1 + ratio), discounted for dropout.
/// Patients are split between arms in proportion to `ratio`, control first.
pub fn sample_size_survival(
    hazard_ratio: f64,
    event_rate_control: f64,
    dropout_rate: f64,
    alpha: f64,
    power: f64,
    ratio: f64,
) -> Result<SampleSizeResult, CtdesignErr> {
    check_positive("hazard ratio", hazard_ratio)?;
    check_effect("log hazard ratio", hazard_ratio.ln())?;
    check_positive("control event rate", event_rate_control)?;
    if event_rate_control > 1.0 {
        return Err(InvalidParameterError::Proportion {
            name: "control event rate",
            value: event_rate_control,
        }
        .into());
    }
    check_rate("dropout rate", dropout_rate)?;
    check_positive("allocation ratio", ratio)?;
    let (z_a, z_b) = two_sided_z(alpha, power)?;

    //----------------------------------------
    // Events
    let log_hr = hazard_ratio.ln();
    let required_events = ceil_n((z_a + z_b).powi(2) * (1.0 + ratio) / (ratio * log_hr.powi(2)))?;

    //----------------------------------------
    // Patients
    let weighted_rate =
        (event_rate_control + ratio * event_rate_control * hazard_ratio) / (1.0 + ratio);
    let adjusted_rate = weighted_rate * (1.0 - dropout_rate);
    let total = ceil_n(required_events as f64 / adjusted_rate)?;

    let n_control = ceil_n(total as f64 / (1.0 + ratio))?.min(total);
    let n_treatment = total - n_control;

    tracing::debug!(
        hazard_ratio,
        event_rate_control,
        dropout_rate,
        required_events,
        total,
        "survival sample size"
    );
    Ok(SampleSizeResult::new(n_control, n_treatment).with_events(required_events))
}

/// Two-sided power of the log-rank design after `events` events; the
/// inverse of the events formula in [`sample_size_survival`]
pub fn power_survival(
    events: usize,
    hazard_ratio: f64,
    alpha: f64,
    ratio: f64,
) -> Result<PowerResult, CtdesignErr> {
    check_alpha(alpha)?;
    check_positive("events", events as f64)?;
    check_positive("hazard ratio", hazard_ratio)?;
    check_positive("allocation ratio", ratio)?;
    let z_a = std_normal_quantile(1.0 - alpha / 2.0)?;

    let effect = hazard_ratio.ln().abs() * (events as f64 * ratio / (1.0 + ratio)).sqrt();
    Ok(PowerResult(
        std_normal_cdf(effect - z_a) + std_normal_cdf(-effect - z_a),
    ))
}
