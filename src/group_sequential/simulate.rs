use itertools::{Itertools, izip};
use rand::{Rng, rngs::StdRng};

use crate::distribution::random::standard_normal;
use crate::error::CtdesignErr;
use crate::group_sequential::types::{GroupSequentialDesign, GroupSequentialSettings, StageStatistic};
use crate::sample_size::{continuous::sample_size_t_test, critical::ceil_n};
use crate::simulation::{replicate, types::SimulationResult};
use crate::spending::{alpha_spending_schedule, equally_spaced_looks, types::SpendingFcn};
use crate::util::error::InvalidParameterError;
use crate::util::validate::{check_alpha_power, check_effect, check_non_negative, check_positive, check_simulations};

// Per-arm sizes of each stage; every stage must enrol someone
fn stage_sizes(cumulative_n: &[usize], max_n: usize) -> Result<Vec<usize>, CtdesignErr> {
    let stages: Vec<usize> = std::iter::once(cumulative_n[0])
        .chain(cumulative_n.iter().tuple_windows().map(|(a, b)| b - a))
        .collect();
    if let Some(look) = stages.iter().position(|&n| n == 0) {
        return Err(InvalidParameterError::EmptyStage {
            look: look + 1,
            max_n,
            looks: cumulative_n.len(),
        }
        .into());
    }
    Ok(stages)
}

struct Trial<'a> {
    stage_n: &'a [usize],
    cumulative_n: &'a [usize],
    boundary: &'a [f64],
    sigma: f64,
    statistic: StageStatistic,
}

impl Trial<'_> {
    /// Look (0-based) at which the boundary is first crossed, if any
    fn run(&self, effect: f64, rng: &mut StdRng) -> Option<usize> {
        let mut weighted_sum = 0.0;
        for (look, (&n_stage, &n_total, &bound)) in
            izip!(self.stage_n, self.cumulative_n, self.boundary).enumerate()
        {
            let se = self.sigma * (2.0 / n_stage as f64).sqrt();
            let z_stage = effect / se + standard_normal(rng);
            let z = match self.statistic {
                StageStatistic::Incremental => z_stage,
                StageStatistic::Cumulative => {
                    weighted_sum += (n_stage as f64).sqrt() * z_stage;
                    weighted_sum / (n_total as f64).sqrt()
                }
            };
            if z.abs() > bound {
                return Some(look);
            }
        }
        None
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        effect: f64,
        simulations: usize,
        rng: &mut R,
    ) -> Result<(SimulationResult, Vec<f64>), CtdesignErr> {
        let stops = replicate(simulations, rng, |rep_rng| self.run(effect, rep_rng))?;

        let looks = self.stage_n.len();
        let max_n = self.cumulative_n[looks - 1];
        let counts = stops.iter().flatten().copied().counts();
        let stopping_probabilities: Vec<f64> = (0..looks)
            .map(|look| *counts.get(&look).unwrap_or(&0) as f64 / simulations as f64)
            .collect();
        let rejections: usize = counts.values().sum();
        let mean_per_arm = stops
            .iter()
            .map(|stop| stop.map_or(max_n, |look| self.cumulative_n[look]) as f64)
            .sum::<f64>()
            / simulations as f64;

        let result = SimulationResult {
            scenario: effect,
            simulated_power: rejections as f64 / simulations as f64,
            expected_sample_size: Some(2.0 * mean_per_arm),
            simulations,
        };
        tracing::debug!(
            effect,
            power = result.simulated_power,
            expected_sample_size = 2.0 * mean_per_arm,
            "group sequential scenario"
        );
        Ok((result, stopping_probabilities))
    }
}

/// Monte-Carlo operating characteristics of a two-arm group sequential
/// design with `interim_looks` equally spaced interim analyses.
///
/// The maximum per-arm N is the fixed-design t-test N inflated by
/// `settings.max_inflation`. At each look the monitored z statistic is
/// compared with the two-sided boundary from `spending_fcn`, and the trial
/// stops for efficacy the first time it is crossed.
pub fn simulate_group_sequential<R: Rng + ?Sized>(
    expected_effect: f64,
    sigma: f64,
    interim_looks: usize,
    alpha: f64,
    power: f64,
    spending_fcn: &SpendingFcn,
    settings: &GroupSequentialSettings,
    rng: &mut R,
) -> Result<GroupSequentialDesign, CtdesignErr> {
    //----------------------------------------
    // Check arguments
    check_effect("expected effect", expected_effect)?;
    check_positive("sigma", sigma)?;
    check_alpha_power(alpha, power)?;
    check_non_negative("maximum sample size inflation", settings.max_inflation)?;
    check_simulations(settings.simulations)?;

    //----------------------------------------
    // Boundaries and stage sizes
    let fixed_sample_size = sample_size_t_test(expected_effect, sigma, alpha, power, 1.0)?;
    let look_fractions = equally_spaced_looks(interim_looks);
    let schedule = alpha_spending_schedule(&look_fractions, alpha, spending_fcn)?;

    let max_n = ceil_n(fixed_sample_size.n_control as f64 * (1.0 + settings.max_inflation))?;
    let cumulative_n: Vec<usize> = look_fractions
        .iter()
        .map(|&t| ceil_n(max_n as f64 * t))
        .collect::<Result<Vec<usize>, CtdesignErr>>()?;
    let stage_n = stage_sizes(&cumulative_n, max_n)?;
    tracing::debug!(max_n, ?cumulative_n, boundary = ?schedule.boundary, "group sequential design");

    //----------------------------------------
    // Simulate
    let trial = Trial {
        stage_n: &stage_n,
        cumulative_n: &cumulative_n,
        boundary: &schedule.boundary,
        sigma,
        statistic: settings.stage_statistic,
    };
    tracing::info!(
        simulations = settings.simulations,
        looks = look_fractions.len(),
        "starting group sequential simulation"
    );
    let (result, stopping_probabilities) =
        trial.simulate(expected_effect, settings.simulations, rng)?;
    let null_result = if settings.simulate_null {
        Some(trial.simulate(0.0, settings.simulations, rng)?.0)
    } else {
        None
    };
    tracing::info!(
        power = result.simulated_power,
        type_i_error = null_result.as_ref().map(|r| r.simulated_power),
        "finished group sequential simulation"
    );

    Ok(GroupSequentialDesign {
        fixed_sample_size,
        max_n_per_arm: max_n,
        cumulative_n,
        schedule,
        result,
        null_result,
        stopping_probabilities,
    })
}
