//----------------------------------------
// compute mod
//----------------------------------------
pub mod types;

pub use crate::adaptive::{conditional_power, simulate_adaptive};
pub use crate::bayesian::{PriorDistribution, bayesian_sample_size};
pub use crate::distribution::{
    beta_pdf, design_rng, inverse_f, log_beta, log_gamma, normal_cdf, standard_normal,
    std_normal_cdf, std_normal_quantile,
};
pub use crate::group_sequential::simulate_group_sequential;
pub use crate::prior_feed::{resolve_dropout, resolve_effect, resolve_variability};
pub use crate::sample_size::{
    power_proportion, power_survival, power_t_test, sample_size_anova,
    sample_size_non_inferiority, sample_size_non_inferiority_continuous,
    sample_size_proportion, sample_size_survival, sample_size_t_test,
};
pub use crate::spending::{alpha_spending_schedule, compute_spending_vec, equally_spaced_looks};
pub use types::{DesignSampleSize, DesignSpecification, Endpoint, Variability};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultDesignParams;

    #[test]
    fn continuous_dispatch() {
        let ss = DesignSpecification::new(Endpoint::Continuous {
            delta: 0.5,
            sigma: 1.0,
        })
        .sample_size()
        .unwrap();
        if let DesignSampleSize::TwoArm(ss) = ss {
            assert_eq!((ss.n_control, ss.n_treatment, ss.total), (63, 63, 126));
        } else {
            panic!()
        }
    }

    #[test]
    fn survival_dispatch() {
        let design = DesignSpecification::new(Endpoint::TimeToEvent {
            hazard_ratio: 0.7,
            event_rate_control: 0.3,
            dropout_rate: 0.1,
        });
        if let DesignSampleSize::TwoArm(ss) = design.sample_size().unwrap() {
            assert_eq!(ss.required_events, Some(124));
            assert_eq!(ss.total, 541);
            assert_eq!((ss.n_control, ss.n_treatment), (271, 270));
        } else {
            panic!()
        }
    }

    #[test]
    fn non_inferiority_uses_one_sided_alpha() {
        let design = DesignSpecification::new(Endpoint::NonInferiority {
            margin: 0.1,
            variability: Variability::ResponseRate { expected_rate: 0.8 },
        });
        assert_eq!(design.alpha, 0.025);
        assert_eq!(design.sample_size().unwrap().total(), 504);

        let continuous = DesignSpecification::new(Endpoint::NonInferiority {
            margin: 1.0,
            variability: Variability::StandardDeviation { sigma: 2.0 },
        });
        assert_eq!(continuous.sample_size().unwrap().total(), 126);
    }

    #[test]
    fn anova_dispatch() {
        let design = DesignSpecification::new(Endpoint::Anova {
            groups: 3,
            effect_size_f: 0.25,
        });
        if let DesignSampleSize::MultiArm(ss) = design.sample_size().unwrap() {
            assert_eq!(ss.groups, 3);
            assert_eq!(ss.total, 3 * ss.n_per_group);
        } else {
            panic!()
        }
    }

    #[test]
    fn binary_dispatch_matches_calculator() {
        let design = DesignSpecification::new(Endpoint::Binary {
            p_control: 0.3,
            p_treatment: 0.5,
        })
        .power(0.9)
        .ratio(2.0);
        let direct = sample_size_proportion(0.3, 0.5, 0.05, 0.9, 2.0).unwrap();
        assert_eq!(design.sample_size().unwrap(), DesignSampleSize::TwoArm(direct));
    }

    #[test]
    fn custom_defaults() {
        let defaults = DefaultDesignParams {
            alpha: 0.01,
            power: 0.9,
            ..Default::default()
        };
        let design = DesignSpecification::with_defaults(
            Endpoint::Continuous {
                delta: 1.0,
                sigma: 1.0,
            },
            &defaults,
        );
        assert_eq!((design.alpha, design.power, design.ratio), (0.01, 0.9, 1.0));
    }

    #[test]
    fn invalid_alpha_surfaces() {
        let design = DesignSpecification::new(Endpoint::Continuous {
            delta: 0.5,
            sigma: 1.0,
        })
        .alpha(0.0);
        if let Err(e) = design.sample_size() {
            assert_eq!(
                String::from("invalid parameter: alpha should be in (0, 1); got 0"),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn specification_from_json() {
        let json = r#"{
            "endpoint": {"type": "binary", "p_control": 0.3, "p_treatment": 0.5},
            "alpha": 0.05,
            "power": 0.8,
            "ratio": 1.0
        }"#;
        let design: DesignSpecification = serde_json::from_str(json).unwrap();
        assert_eq!(design.sample_size().unwrap().total(), 2 * 371);
    }
}
