use crate::bayesian::prior::PriorDistribution;
use crate::bayesian::types::{
    ArmPrior, BayesianDesign, BayesianSettings, NonConvergenceWarning, SearchStatus,
};
use crate::distribution::std_normal::normal_cdf;
use crate::error::CtdesignErr;
use crate::sample_size::types::SampleSizeResult;
use crate::util::validate::{check_finite, check_positive, check_proportion};

#[derive(Debug, Clone, Copy)]
struct Posterior {
    mean_difference: f64,
    variance_difference: f64,
    probability: f64,
}

#[derive(Debug)]
enum SearchState {
    Searching { n: usize },
    Converged { n: usize, posterior: Posterior },
    Capped { n: usize, posterior: Posterior },
}

// Conjugate normal update of one arm after n observations averaging data_mean
fn update_arm(prior: &ArmPrior, n: usize, data_mean: f64, data_precision: f64) -> (f64, f64) {
    let prior_precision = 1.0 / prior.sd.powi(2);
    let precision = prior_precision + n as f64 * data_precision;
    let mean = (prior_precision * prior.mean + n as f64 * data_precision * data_mean) / precision;
    (mean, 1.0 / precision)
}

fn posterior_at(
    n: usize,
    control: &ArmPrior,
    treatment: &ArmPrior,
    expected_difference: f64,
    data_sigma: f64,
) -> Result<Posterior, CtdesignErr> {
    let data_precision = 1.0 / data_sigma.powi(2);
    // Data as if collected: control at its prior mean, treatment shifted by the effect
    let (mean_c, var_c) = update_arm(control, n, control.mean, data_precision);
    let (mean_t, var_t) = update_arm(
        treatment,
        n,
        control.mean + expected_difference,
        data_precision,
    );

    let mean_difference = mean_t - mean_c;
    let variance_difference = var_t + var_c;
    let probability = 1.0 - normal_cdf(0.0, mean_difference, variance_difference.sqrt())?;
    Ok(Posterior {
        mean_difference,
        variance_difference,
        probability,
    })
}

/// Smallest common per-arm n at which P(treatment > control | data) reaches
/// `threshold`, with normal priors on both arm means and normal data of known
/// SD `data_sigma`.
///
/// The search stops at `settings.max_n`; hitting the cap is reported through
/// [`SearchStatus::Capped`], not as an error.
pub fn bayesian_sample_size(
    control: &ArmPrior,
    treatment: &ArmPrior,
    expected_difference: f64,
    data_sigma: f64,
    threshold: f64,
    settings: &BayesianSettings,
) -> Result<BayesianDesign, CtdesignErr> {
    check_finite("control prior mean", control.mean)?;
    check_finite("treatment prior mean", treatment.mean)?;
    check_positive("control prior sd", control.sd)?;
    check_positive("treatment prior sd", treatment.sd)?;
    check_finite("expected difference", expected_difference)?;
    check_positive("data sigma", data_sigma)?;
    check_proportion("posterior probability threshold", threshold)?;
    check_positive("maximum sample size", settings.max_n as f64)?;

    let mut state = SearchState::Searching { n: 1 };
    let (n, posterior, capped) = loop {
        state = match state {
            SearchState::Searching { n } => {
                let posterior =
                    posterior_at(n, control, treatment, expected_difference, data_sigma)?;
                if posterior.probability >= threshold {
                    SearchState::Converged { n, posterior }
                } else if n >= settings.max_n {
                    SearchState::Capped { n, posterior }
                } else {
                    SearchState::Searching { n: n + 1 }
                }
            }
            SearchState::Converged { n, posterior } => {
                tracing::debug!(n, probability = posterior.probability, "bayesian search converged");
                break (n, posterior, false);
            }
            SearchState::Capped { n, posterior } => {
                tracing::warn!(
                    n,
                    probability = posterior.probability,
                    threshold,
                    "bayesian search hit its sample size cap"
                );
                break (n, posterior, true);
            }
        };
    };

    let status = if capped {
        SearchStatus::Capped(NonConvergenceWarning {
            max_n: settings.max_n,
            posterior_probability: posterior.probability,
            threshold,
        })
    } else {
        SearchStatus::Converged
    };

    Ok(BayesianDesign {
        sample_size: SampleSizeResult::new(n, n),
        posterior_probability: posterior.probability,
        posterior_difference: PriorDistribution::normal(
            posterior.mean_difference,
            posterior.variance_difference,
        )?,
        status,
    })
}
