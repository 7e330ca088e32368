use std::time::Instant;

use ctdesign::adaptive::AdaptiveRule;
use ctdesign::bayesian::ArmPrior;
use ctdesign::config::DesignConfig;
use ctdesign::spending::SpendingFcn;
use ctdesign::{
    CtdesignErr, DesignSpecification, Endpoint, bayesian_sample_size, design_rng,
    sample_size_anova, simulate_adaptive, simulate_group_sequential,
};

fn main() -> Result<(), CtdesignErr> {
    // Optional TOML file with defaults and simulator settings
    let config = match std::env::args().nth(1) {
        Some(path) => DesignConfig::load(std::path::Path::new(&path))?,
        None => DesignConfig::default(),
    };
    let defaults = &config.defaults;

    //----------------------------------------
    // Closed-form designs
    let endpoints = [
        Endpoint::Continuous {
            delta: 0.5,
            sigma: 1.0,
        },
        Endpoint::Binary {
            p_control: 0.3,
            p_treatment: 0.5,
        },
        Endpoint::TimeToEvent {
            hazard_ratio: 0.7,
            event_rate_control: 0.3,
            dropout_rate: defaults.dropout_rate,
        },
    ];
    for endpoint in endpoints {
        let start = Instant::now();
        let ss = DesignSpecification::with_defaults(endpoint, defaults).sample_size()?;
        println!("{:?}: {:?} ({:?})", endpoint, ss, start.elapsed());
    }

    let start = Instant::now();
    let anova = sample_size_anova(3, 0.25, defaults.alpha, defaults.power)?;
    println!("ANOVA, 3 groups, f = 0.25: {:?} ({:?})", anova, start.elapsed());

    //----------------------------------------
    // Bayesian search
    let vague = ArmPrior {
        mean: 0.0,
        sd: 10.0,
    };
    let start = Instant::now();
    let bayes = bayesian_sample_size(
        &vague,
        &vague,
        0.5,
        1.0,
        defaults.posterior_threshold,
        &config.bayesian,
    )?;
    println!(
        "Bayesian: n = {} per arm, P(superiority) = {:.4} ({:?})",
        bayes.sample_size.n_control,
        bayes.posterior_probability,
        start.elapsed()
    );
    if let Some(warning) = bayes.warning() {
        println!("  {}", warning);
    }

    //----------------------------------------
    // Simulations
    let mut rng = design_rng(Some(24601));
    let start = Instant::now();
    let gs = simulate_group_sequential(
        0.5,
        1.0,
        2,
        defaults.alpha,
        defaults.power,
        &SpendingFcn::OBrienFleming,
        &config.group_sequential,
        &mut rng,
    )?;
    println!(
        "Group sequential ({} sims): boundaries {:?}, power {:.4}, type I error {:?} ({:?})",
        gs.result.simulations,
        gs.schedule.boundary,
        gs.result.simulated_power,
        gs.null_result.map(|r| r.simulated_power),
        start.elapsed()
    );

    for rule in [AdaptiveRule::PromisingZone, AdaptiveRule::ConditionalPower] {
        let start = Instant::now();
        let scenarios = simulate_adaptive(
            0.5,
            1.0,
            rule,
            defaults.alpha,
            defaults.power,
            &config.adaptive,
            &mut rng,
        )?;
        println!("Adaptive {:?} ({:?}):", rule, start.elapsed());
        for s in scenarios {
            println!(
                "  effect {:.3}: power {:.4}, E[N] {:.1}, increased {:.3}, futility {:.3}",
                s.result.scenario,
                s.result.simulated_power,
                s.result.expected_sample_size.unwrap_or(f64::NAN),
                s.fraction_increased,
                s.fraction_futility
            );
        }
    }

    Ok(())
}
