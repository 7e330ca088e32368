use itertools::Itertools;

use crate::distribution::std_normal::{std_normal_cdf, std_normal_quantile};
use crate::error::CtdesignErr;
use crate::spending::{
    error::SpendingFcnErr,
    types::{AlphaSpendingSchedule, SpendingFcn},
};

/// Information fractions (i + 1) / (k + 1), i = 0..=k, for k interim looks
pub fn equally_spaced_looks(interim_looks: usize) -> Vec<f64> {
    let analyses = interim_looks + 1;
    (1..=analyses)
        .map(|i| {
            if i == analyses {
                1.0
            } else {
                i as f64 / analyses as f64
            }
        })
        .collect()
}

// Returns cumulative alpha spent at each look
pub fn compute_spending_vec(
    look_fractions: &[f64],
    alpha: f64,
    spending_fcn: &SpendingFcn,
) -> Result<Vec<f64>, CtdesignErr> {
    //----------------------------------------
    // Check arguments
    if look_fractions.is_empty() {
        return Err(SpendingFcnErr::TimeVectorEmpty.into());
    }
    if let Some(&last_fraction) = look_fractions.last()
        && last_fraction != 1.0
    {
        return Err(SpendingFcnErr::BadLastFraction(last_fraction).into());
    }
    if look_fractions.iter().tuple_windows().any(|(a, b)| a >= b) {
        return Err(SpendingFcnErr::NotIncreasing.into());
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(SpendingFcnErr::BadAlpha(alpha).into());
    }

    //----------------------------------------
    // Compute alpha spend
    match spending_fcn {
        SpendingFcn::OBrienFleming => look_fractions
            .iter()
            .map(|&t| lan_demets_obrien_fleming(t, alpha))
            .collect::<Result<Vec<f64>, CtdesignErr>>(),
        SpendingFcn::Pocock => {
            let looks = look_fractions.len();
            Ok((1..=looks)
                .map(|i| {
                    if i == looks {
                        alpha
                    } else {
                        alpha * i as f64 / looks as f64
                    }
                })
                .collect())
        }
        SpendingFcn::Custom { cumulative_spend } => {
            if cumulative_spend.len() != look_fractions.len() {
                return Err(SpendingFcnErr::MismatchedLengths {
                    looks: look_fractions.len(),
                    spend: cumulative_spend.len(),
                }
                .into());
            }
            let last = cumulative_spend[cumulative_spend.len() - 1];
            let in_range = cumulative_spend.iter().all(|&a| (0.0..=alpha).contains(&a));
            let monotone = cumulative_spend.iter().tuple_windows().all(|(a, b)| a <= b);
            if !in_range || !monotone || (last - alpha).abs() > 1e-12 {
                return Err(SpendingFcnErr::BadCustomSpend { alpha, last }.into());
            }
            Ok(cumulative_spend.clone())
        }
    }
}

fn lan_demets_obrien_fleming(t: f64, alpha: f64) -> Result<f64, CtdesignErr> {
    if !(t > 0.0 && t <= 1.0) {
        Err(SpendingFcnErr::OutOfBounds(t).into())
    } else if t == 1.0 {
        // Hardcode to avoid numerical precision issues
        Ok(alpha)
    } else {
        let z_alpha = std_normal_quantile(1. - alpha / 2.)?;
        let spend = (2. - 2. * std_normal_cdf(z_alpha / t.sqrt())).min(alpha);
        Ok(spend)
    }
}

/// Two-sided critical value at each look.
///
/// O'Brien-Fleming plugs the cumulative spend straight into
/// z = Phi^-1(1 - a/2), which reproduces the z_{1-alpha/2} / sqrt(t) shape.
/// Pocock and custom schedules use the alpha newly spent at each look, so
/// equal spending gives a flat boundary.
fn boundaries(cumulative_spend: &[f64], spending_fcn: &SpendingFcn) -> Result<Vec<f64>, CtdesignErr> {
    let look_alpha: Vec<f64> = match spending_fcn {
        SpendingFcn::OBrienFleming => cumulative_spend.to_vec(),
        SpendingFcn::Pocock | SpendingFcn::Custom { .. } => {
            std::iter::once(cumulative_spend[0])
                .chain(cumulative_spend.iter().tuple_windows().map(|(a, b)| b - a))
                .collect()
        }
    };
    look_alpha
        .iter()
        .map(|&a| {
            if a <= 0.0 {
                // Nothing spent: the look can never reject
                Ok(f64::INFINITY)
            } else {
                std_normal_quantile(1.0 - a / 2.0)
            }
        })
        .collect()
}

pub fn alpha_spending_schedule(
    look_fractions: &[f64],
    alpha: f64,
    spending_fcn: &SpendingFcn,
) -> Result<AlphaSpendingSchedule, CtdesignErr> {
    let alpha_spent = compute_spending_vec(look_fractions, alpha, spending_fcn)?;
    let boundary = boundaries(&alpha_spent, spending_fcn)?;
    tracing::debug!(?alpha_spent, ?boundary, "alpha spending schedule");
    Ok(AlphaSpendingSchedule {
        information_fraction: look_fractions.to_vec(),
        alpha_spent,
        boundary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_fcn_error() {
        if let Err(e) = lan_demets_obrien_fleming(1.1, 0.05) {
            assert_eq!(
                String::from(
                    "while evaluating spending function: arguments to \
                    spending function should be in (0, 1]; got 1.1"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn ldof_0_75_0_025() {
        assert!(
            lan_demets_obrien_fleming(0.75, 0.025).is_ok_and(|x| (x - 0.009649325).abs() < 0.0001)
        )
    }

    #[test]
    fn ldof_2_look() {
        let alpha_spend =
            compute_spending_vec(&[0.7, 1.0], 0.025, &SpendingFcn::OBrienFleming).unwrap();
        assert!((alpha_spend[0] - 0.007384489).abs() < 0.0001);
        assert_eq!(alpha_spend[1], 0.025);
    }

    #[test]
    fn ldof_3_look() {
        let alpha_spend =
            compute_spending_vec(&[0.3, 0.6, 1.0], 0.025, &SpendingFcn::OBrienFleming).unwrap();
        assert!((alpha_spend[0] - 4.272579e-05).abs() < 0.0001);
        assert!((alpha_spend[1] - alpha_spend[0] - 3.765338e-03).abs() < 0.0001);
    }

    #[test]
    fn equally_spaced() {
        assert_eq!(equally_spaced_looks(0), vec![1.0]);
        assert_eq!(equally_spaced_looks(1), vec![0.5, 1.0]);
        let three = equally_spaced_looks(3);
        assert_eq!(three, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn pocock_equal_spend() {
        let schedule =
            alpha_spending_schedule(&equally_spaced_looks(2), 0.05, &SpendingFcn::Pocock).unwrap();
        assert!((schedule.alpha_spent[0] - 0.05 / 3.0).abs() < 1e-12);
        assert!((schedule.alpha_spent[1] - 0.1 / 3.0).abs() < 1e-12);
        assert_eq!(schedule.alpha_spent[2], 0.05);
        // Flat boundary at Phi^-1(1 - 0.05 / 6)
        for b in &schedule.boundary {
            assert!((b - 2.39398).abs() < 1e-3, "{b}");
        }
    }

    #[test]
    fn obrien_fleming_boundary_shape() {
        let schedule = alpha_spending_schedule(
            &equally_spaced_looks(3),
            0.05,
            &SpendingFcn::OBrienFleming,
        )
        .unwrap();
        // z_{0.975} / sqrt(t)
        for (t, b) in schedule.information_fraction.iter().zip(&schedule.boundary) {
            assert!((b - 1.959964 / t.sqrt()).abs() < 1e-4, "t = {t}");
        }
        assert_eq!(*schedule.alpha_spent.last().unwrap(), 0.05);
    }

    #[test]
    fn custom_spend() {
        let spend = SpendingFcn::Custom {
            cumulative_spend: vec![0.01, 0.02, 0.025],
        };
        let schedule = alpha_spending_schedule(&[0.3, 0.6, 1.0], 0.025, &spend).unwrap();
        assert_eq!(schedule.alpha_spent, vec![0.01, 0.02, 0.025]);
        // Boundaries from increments 0.01, 0.01, 0.005
        assert!((schedule.boundary[0] - schedule.boundary[1]).abs() < 1e-9);
        assert!(schedule.boundary[2] > schedule.boundary[1]);
    }

    #[test]
    fn custom_spend_zero_first_look() {
        let spend = SpendingFcn::Custom {
            cumulative_spend: vec![0.0, 0.05],
        };
        let schedule = alpha_spending_schedule(&[0.5, 1.0], 0.05, &spend).unwrap();
        assert!(schedule.boundary[0].is_infinite());
    }

    #[test]
    fn custom_spend_errors() {
        let short = SpendingFcn::Custom {
            cumulative_spend: vec![0.01, 0.025],
        };
        if let Err(e) = compute_spending_vec(&[0.3, 0.6, 1.0], 0.025, &short) {
            assert_eq!(
                String::from(
                    "while evaluating spending function: custom spend has 2 values for 3 looks"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }

        let decreasing = SpendingFcn::Custom {
            cumulative_spend: vec![0.02, 0.01, 0.025],
        };
        assert!(compute_spending_vec(&[0.3, 0.6, 1.0], 0.025, &decreasing).is_err());

        let wrong_total = SpendingFcn::Custom {
            cumulative_spend: vec![0.01, 0.02, 0.03],
        };
        assert!(compute_spending_vec(&[0.3, 0.6, 1.0], 0.025, &wrong_total).is_err());
    }

    #[test]
    fn look_fraction_errors() {
        assert!(compute_spending_vec(&[], 0.05, &SpendingFcn::Pocock).is_err());
        assert!(compute_spending_vec(&[0.5, 0.9], 0.05, &SpendingFcn::Pocock).is_err());
        assert!(compute_spending_vec(&[0.6, 0.5, 1.0], 0.05, &SpendingFcn::Pocock).is_err());
        assert!(compute_spending_vec(&[0.5, 1.0], 1.5, &SpendingFcn::Pocock).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn obrien_fleming_ordering(interim_looks in 0usize..10, alpha in 0.001f64..0.2) {
            let schedule = alpha_spending_schedule(
                &equally_spaced_looks(interim_looks),
                alpha,
                &SpendingFcn::OBrienFleming,
            ).unwrap();
            for (a, b) in schedule.boundary.iter().tuple_windows() {
                prop_assert!(b <= a);
            }
            for (a, b) in schedule.alpha_spent.iter().tuple_windows() {
                prop_assert!(a <= b);
            }
            prop_assert!((schedule.alpha_spent.last().unwrap() - alpha).abs() < 1e-6);
        }
    }
}
