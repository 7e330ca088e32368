use crate::distribution::error::DomainError;
use crate::distribution::f_dist::inverse_f;
use crate::error::CtdesignErr;
use crate::sample_size::critical::ceil_n;
use crate::sample_size::types::AnovaSampleSize;
use crate::util::error::InvalidParameterError;
use crate::util::validate::{check_alpha_power, check_positive};

// Error degrees of freedom used before any sample size is known
const INITIAL_DF2: f64 = 1_000.;
const MAX_ITERATIONS: usize = 50;

fn n_per_group_at(
    df2: f64,
    groups: usize,
    effect_size_f: f64,
    alpha: f64,
) -> Result<usize, CtdesignErr> {
    let lambda = groups as f64 * effect_size_f.powi(2);
    let critical_f = inverse_f(1.0 - alpha, (groups - 1) as f64, df2)?;
    // Each group needs two observations for a positive error df
    Ok(ceil_n(critical_f * (1.0 + 1.0 / lambda) / effect_size_f.powi(2))?.max(2))
}

/// One-way ANOVA across `groups` groups with Cohen's f effect size.
///
/// n_per_group = crit_F (1 + 1/lambda) / f^2 with lambda = groups f^2 and
/// crit_F the (1 - alpha) quantile of F(groups - 1, df2). The error degrees of
/// freedom depend on the answer, so df2 = groups (n - 1) is iterated to a fixed
/// point. When the iteration cycles, the largest size in the cycle is used;
/// when df2 gets too small for the F approximation, the last size is kept.
///
/// `power` is validated but, as in the closed form above, does not enter the
/// calculation.
pub fn sample_size_anova(
    groups: usize,
    effect_size_f: f64,
    alpha: f64,
    power: f64,
) -> Result<AnovaSampleSize, CtdesignErr> {
    if groups < 2 {
        return Err(InvalidParameterError::TooFewGroups { min: 2, got: groups }.into());
    }
    check_positive("effect size f", effect_size_f)?;
    check_alpha_power(alpha, power)?;

    let mut history: Vec<usize> = vec![n_per_group_at(INITIAL_DF2, groups, effect_size_f, alpha)?];
    let mut n_per_group = history[0];
    let mut settled = false;

    for _ in 0..MAX_ITERATIONS {
        let df2 = groups as f64 * (n_per_group - 1) as f64;
        let next = match n_per_group_at(df2, groups, effect_size_f, alpha) {
            Ok(next) => next,
            // No F quantile at this tiny error df; keep the last admissible size
            Err(CtdesignErr::Domain(DomainError::FApproximation { .. })) => {
                tracing::debug!(n_per_group, df2, "anova df2 outside F approximation");
                settled = true;
                break;
            }
            Err(e) => return Err(e),
        };
        if next == n_per_group {
            settled = true;
            break;
        }
        if let Some(start) = history.iter().position(|&n| n == next) {
            n_per_group = history[start..].iter().copied().max().unwrap_or(next);
            tracing::debug!(n_per_group, "anova df2 iteration cycled");
            settled = true;
            break;
        }
        history.push(next);
        n_per_group = next;
    }
    if !settled {
        tracing::warn!(n_per_group, "anova df2 iteration hit its cap");
    }

    let total = n_per_group
        .checked_mul(groups)
        .ok_or(InvalidParameterError::SampleSizeTooLarge(n_per_group as f64 * groups as f64))?;
    Ok(AnovaSampleSize {
        n_per_group,
        groups,
        total,
    })
}
