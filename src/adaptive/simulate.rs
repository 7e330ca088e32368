use rand::{Rng, rngs::StdRng};
use statrs::statistics::Statistics;

use crate::adaptive::conditional_power::conditional_power;
use crate::adaptive::types::{AdaptiveRule, AdaptiveScenarioResult, AdaptiveSettings, FinalStatistic};
use crate::distribution::random::standard_normal;
use crate::distribution::std_normal::std_normal_quantile;
use crate::error::CtdesignErr;
use crate::sample_size::{continuous::sample_size_t_test, critical::ceil_n};
use crate::simulation::{replicate, types::SimulationResult};
use crate::util::error::InvalidParameterError;
use crate::util::validate::{
    check_alpha_power, check_effect, check_finite, check_non_negative, check_ordered,
    check_positive, check_proportion, check_simulations,
};

#[derive(Debug, Clone, Copy)]
struct Outcome {
    rejected: bool,
    final_n: usize,
    increased: bool,
    futility: bool,
}

struct AdaptiveTrial<'a> {
    planned_n: usize,
    interim_n: usize,
    sigma: f64,
    alpha: f64,
    power: f64,
    z_alpha: f64,
    rule: AdaptiveRule,
    settings: &'a AdaptiveSettings,
}

impl AdaptiveTrial<'_> {
    fn stage_se(&self, n: usize) -> f64 {
        self.sigma * (2.0 / n as f64).sqrt()
    }

    // Per-arm N after the interim, or None to stop for futility
    fn reestimate(&self, interim_effect: f64, z_interim: f64) -> Result<Option<usize>, CtdesignErr> {
        match self.rule {
            AdaptiveRule::PromisingZone => {
                let zone = &self.settings.promising_zone;
                let promising = z_interim.abs() >= zone.lower && z_interim.abs() < zone.upper;
                Ok(Some(if promising {
                    ceil_n(self.planned_n as f64 * (1.0 + zone.increase))?
                } else {
                    self.planned_n
                }))
            }
            AdaptiveRule::ConditionalPower => {
                let cp_settings = &self.settings.conditional_power;
                let cp = conditional_power(
                    interim_effect,
                    self.interim_n,
                    self.planned_n,
                    self.sigma,
                    self.alpha,
                )?;
                if cp < cp_settings.futility {
                    return Ok(None);
                }
                if cp >= cp_settings.favorable {
                    return Ok(Some(self.planned_n));
                }
                let cap = ceil_n(self.planned_n as f64 * cp_settings.max_multiplier)?;
                // A zero or vanishing interim estimate can only land here with a
                // futility bound near 0; it asks for more than the cap anyway
                let required = if interim_effect == 0.0 {
                    cap
                } else {
                    match sample_size_t_test(interim_effect, self.sigma, self.alpha, self.power, 1.0) {
                        Ok(ss) => ss.n_control,
                        Err(CtdesignErr::InvalidParameter(InvalidParameterError::SampleSizeTooLarge(_))) => cap,
                        Err(e) => return Err(e),
                    }
                };
                Ok(Some(required.clamp(self.interim_n, cap.max(self.interim_n))))
            }
        }
    }

    fn run(&self, effect: f64, rng: &mut StdRng) -> Result<Outcome, CtdesignErr> {
        let se_interim = self.stage_se(self.interim_n);
        let z_interim = effect / se_interim + standard_normal(rng);
        let interim_effect = z_interim * se_interim;

        let Some(final_n) = self.reestimate(interim_effect, z_interim)? else {
            return Ok(Outcome {
                rejected: false,
                final_n: self.interim_n,
                increased: false,
                futility: true,
            });
        };

        let second_n = final_n - self.interim_n;
        let z_final = if second_n == 0 {
            z_interim
        } else {
            let z_second = effect / self.stage_se(second_n) + standard_normal(rng);
            match self.settings.final_statistic {
                FinalStatistic::Pooled => {
                    ((self.interim_n as f64).sqrt() * z_interim
                        + (second_n as f64).sqrt() * z_second)
                        / (final_n as f64).sqrt()
                }
                FinalStatistic::InverseNormal => {
                    let w_interim = (self.interim_n as f64 / self.planned_n as f64).sqrt();
                    let w_second = (1.0 - w_interim.powi(2)).max(0.0).sqrt();
                    w_interim * z_interim + w_second * z_second
                }
            }
        };

        Ok(Outcome {
            rejected: z_final.abs() > self.z_alpha,
            final_n,
            increased: final_n > self.planned_n,
            futility: false,
        })
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        effect: f64,
        rng: &mut R,
    ) -> Result<AdaptiveScenarioResult, CtdesignErr> {
        let simulations = self.settings.simulations;
        let outcomes = replicate(simulations, rng, |rep_rng| self.run(effect, rep_rng))?
            .into_iter()
            .collect::<Result<Vec<Outcome>, CtdesignErr>>()?;

        let share = |f: fn(&Outcome) -> bool| {
            outcomes.iter().filter(|o| f(o)).count() as f64 / simulations as f64
        };
        let expected_sample_size = outcomes
            .iter()
            .map(|o| 2.0 * o.final_n as f64)
            .collect::<Vec<f64>>()
            .mean();

        let scenario = AdaptiveScenarioResult {
            result: SimulationResult {
                scenario: effect,
                simulated_power: share(|o| o.rejected),
                expected_sample_size: Some(expected_sample_size),
                simulations,
            },
            fraction_increased: share(|o| o.increased),
            fraction_futility: share(|o| o.futility),
        };
        tracing::debug!(
            effect,
            power = scenario.result.simulated_power,
            expected_sample_size,
            fraction_increased = scenario.fraction_increased,
            fraction_futility = scenario.fraction_futility,
            "adaptive scenario"
        );
        Ok(scenario)
    }
}

fn check_settings(settings: &AdaptiveSettings) -> Result<(), CtdesignErr> {
    check_simulations(settings.simulations)?;
    check_proportion("interim fraction", settings.interim_fraction)?;
    for &multiplier in &settings.scenario_multipliers {
        check_finite("scenario multiplier", multiplier)?;
    }
    let zone = &settings.promising_zone;
    check_non_negative("promising zone lower bound", zone.lower)?;
    check_non_negative("promising zone upper bound", zone.upper)?;
    check_non_negative("promising zone increase", zone.increase)?;
    check_ordered(
        ("promising zone lower bound", zone.lower),
        ("promising zone upper bound", zone.upper),
    )?;
    let cp = &settings.conditional_power;
    check_non_negative("futility threshold", cp.futility)?;
    check_non_negative("favorable threshold", cp.favorable)?;
    check_ordered(
        ("futility threshold", cp.futility),
        ("favorable threshold", cp.favorable),
    )?;
    check_positive("maximum sample size multiplier", cp.max_multiplier)
}

/// Simulates interim sample size re-estimation under each true-effect
/// scenario `multiplier * initial_effect`.
///
/// The planned per-arm N is the t-test N for `initial_effect`. An interim
/// estimate is drawn from `settings.interim_fraction` of it, `rule` revises
/// the N, and the final two-sided test at level `alpha` uses the revised N.
/// One result is returned per scenario, in the order of
/// `settings.scenario_multipliers`.
pub fn simulate_adaptive<R: Rng + ?Sized>(
    initial_effect: f64,
    sigma: f64,
    rule: AdaptiveRule,
    alpha: f64,
    power: f64,
    settings: &AdaptiveSettings,
    rng: &mut R,
) -> Result<Vec<AdaptiveScenarioResult>, CtdesignErr> {
    //----------------------------------------
    // Check arguments
    check_effect("initial effect", initial_effect)?;
    check_positive("sigma", sigma)?;
    check_alpha_power(alpha, power)?;
    check_settings(settings)?;

    //----------------------------------------
    // Planned design
    let planned_n = sample_size_t_test(initial_effect, sigma, alpha, power, 1.0)?.n_control;
    let interim_n = ceil_n(planned_n as f64 * settings.interim_fraction)?.min(planned_n);
    let trial = AdaptiveTrial {
        planned_n,
        interim_n,
        sigma,
        alpha,
        power,
        z_alpha: std_normal_quantile(1.0 - alpha / 2.0)?,
        rule,
        settings,
    };
    tracing::info!(
        ?rule,
        planned_n,
        interim_n,
        simulations = settings.simulations,
        scenarios = settings.scenario_multipliers.len(),
        "starting adaptive simulation"
    );

    //----------------------------------------
    // Simulate each scenario
    let results = settings
        .scenario_multipliers
        .iter()
        .map(|&multiplier| trial.simulate(multiplier * initial_effect, rng))
        .collect::<Result<Vec<AdaptiveScenarioResult>, CtdesignErr>>()?;
    tracing::info!(scenarios = results.len(), "finished adaptive simulation");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::types::{ConditionalPowerSettings, PromisingZoneSettings};
    use crate::distribution::random::design_rng;

    fn settings(simulations: usize) -> AdaptiveSettings {
        AdaptiveSettings {
            simulations,
            ..Default::default()
        }
    }

    fn powers(results: &[AdaptiveScenarioResult]) -> Vec<f64> {
        results.iter().map(|r| r.result.simulated_power).collect()
    }

    #[test]
    fn one_result_per_scenario() {
        let results = simulate_adaptive(
            0.5,
            1.0,
            AdaptiveRule::PromisingZone,
            0.05,
            0.8,
            &settings(500),
            &mut design_rng(Some(24601)),
        )
        .unwrap();
        assert_eq!(results.len(), 4);
        let scenarios: Vec<f64> = results.iter().map(|r| r.result.scenario).collect();
        assert_eq!(scenarios, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(results.iter().all(|r| r.result.simulations == 500));
    }

    #[test]
    fn seeded_runs_reproduce() {
        let run = || {
            simulate_adaptive(
                0.5,
                1.0,
                AdaptiveRule::ConditionalPower,
                0.05,
                0.8,
                &settings(5_000),
                &mut design_rng(Some(42)),
            )
            .unwrap()
        };
        let first = powers(&run());
        let second = powers(&run());
        for (a, b) in first.iter().zip(&second) {
            assert!((a - b).abs() <= 0.02);
        }
        assert_eq!(first, second);
    }

    #[test]
    fn promising_zone_operating_characteristics() {
        let results = simulate_adaptive(
            0.5,
            1.0,
            AdaptiveRule::PromisingZone,
            0.05,
            0.8,
            &settings(4_000),
            &mut design_rng(Some(7)),
        )
        .unwrap();
        let power = powers(&results);
        assert!(power.windows(2).all(|w| w[0] < w[1]), "{power:?}");
        assert!(power[0] < 0.08, "type I error {}", power[0]);
        // At least the planned 80%, with some extra from increases
        assert!(power[2] > 0.78 && power[2] < 0.92, "{}", power[2]);

        // 63 planned per arm, 95 after an increase
        for r in &results {
            let n = r.result.expected_sample_size.unwrap();
            assert!((126.0..=190.0).contains(&n), "{n}");
            assert_eq!(r.fraction_futility, 0.0);
            let expected = 126.0 + 64.0 * r.fraction_increased;
            assert!((n - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn conditional_power_stops_for_futility_under_null() {
        let results = simulate_adaptive(
            0.5,
            1.0,
            AdaptiveRule::ConditionalPower,
            0.05,
            0.8,
            &AdaptiveSettings {
                simulations: 4_000,
                scenario_multipliers: vec![0.0, 1.0],
                ..Default::default()
            },
            &mut design_rng(Some(3)),
        )
        .unwrap();
        let null = &results[0];
        // CP < 0.3 when |z1| < 1.12 at t = 0.5
        assert!(null.fraction_futility > 0.65, "{}", null.fraction_futility);
        assert!(null.result.simulated_power < 0.05);
        assert!(null.result.expected_sample_size.unwrap() < 126.0);

        let alternative = &results[1];
        assert!(alternative.fraction_futility < null.fraction_futility);
        assert!(alternative.result.simulated_power > null.result.simulated_power + 0.4);
        // Never beyond twice the planned N
        assert!(alternative.result.expected_sample_size.unwrap() <= 252.0);
    }

    #[test]
    fn inverse_normal_combination() {
        let results = simulate_adaptive(
            0.5,
            1.0,
            AdaptiveRule::PromisingZone,
            0.05,
            0.8,
            &AdaptiveSettings {
                simulations: 4_000,
                scenario_multipliers: vec![0.0, 1.0],
                final_statistic: FinalStatistic::InverseNormal,
                ..Default::default()
            },
            &mut design_rng(Some(19)),
        )
        .unwrap();
        assert!(results[0].result.simulated_power < 0.07);
        assert!(results[1].result.simulated_power > 0.7);
    }

    #[test]
    fn invalid_inputs() {
        let mut rng = design_rng(Some(1));
        assert!(
            simulate_adaptive(0.5, 1.0, AdaptiveRule::PromisingZone, 0.05, 0.8, &settings(0), &mut rng)
                .is_err()
        );
        if let Err(e) = simulate_adaptive(
            0.5,
            1.0,
            AdaptiveRule::PromisingZone,
            0.05,
            0.8,
            &AdaptiveSettings {
                interim_fraction: 1.0,
                ..Default::default()
            },
            &mut rng,
        ) {
            assert_eq!(
                String::from("invalid parameter: interim fraction should be in (0, 1); got 1"),
                format!("{}", e)
            );
        } else {
            panic!()
        }
        assert!(
            simulate_adaptive(0.0, 1.0, AdaptiveRule::ConditionalPower, 0.05, 0.8, &settings(10), &mut rng)
                .is_err()
        );
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let mut rng = design_rng(Some(1));
        let inverted_zone = AdaptiveSettings {
            promising_zone: PromisingZoneSettings {
                lower: 1.5,
                upper: 0.5,
                ..Default::default()
            },
            ..settings(10)
        };
        if let Err(e) =
            simulate_adaptive(0.5, 1.0, AdaptiveRule::PromisingZone, 0.05, 0.8, &inverted_zone, &mut rng)
        {
            assert_eq!(
                String::from(
                    "invalid parameter: promising zone lower bound (1.5) should not exceed \
                    promising zone upper bound (0.5)"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }

        let inverted_cp = AdaptiveSettings {
            conditional_power: ConditionalPowerSettings {
                futility: 0.9,
                favorable: 0.8,
                ..Default::default()
            },
            ..settings(10)
        };
        if let Err(e) =
            simulate_adaptive(0.5, 1.0, AdaptiveRule::ConditionalPower, 0.05, 0.8, &inverted_cp, &mut rng)
        {
            assert_eq!(
                String::from(
                    "invalid parameter: futility threshold (0.9) should not exceed \
                    favorable threshold (0.8)"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }
}
