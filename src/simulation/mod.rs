//----------------------------------------
// simulation mod
//----------------------------------------
pub mod types;

pub use types::SimulationResult;

use rand::{Rng, SeedableRng, rngs::StdRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::CtdesignErr;
use crate::util::validate::check_simulations;

/// Seed for replication `i`, mixed so that neighbouring counters give
/// unrelated streams (SplitMix64 finaliser)
pub(crate) fn counter_seed(base_seed: u64, i: u64) -> u64 {
    let mut z = base_seed.wrapping_add(i.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Runs `simulations` independent replications of `replicate`.
///
/// A single base seed is drawn from `rng`; replication `i` gets its own
/// `StdRng` seeded from `(base_seed, i)`, so the output depends only on the
/// caller's generator and never on how replications are scheduled. Output is
/// in replication order.
pub(crate) fn replicate<R, T, F>(
    simulations: usize,
    rng: &mut R,
    replicate: F,
) -> Result<Vec<T>, CtdesignErr>
where
    R: Rng + ?Sized,
    T: Send,
    F: Fn(&mut StdRng) -> T + Sync + Send,
{
    check_simulations(simulations)?;
    let base_seed: u64 = rng.r#gen();

    #[cfg(feature = "parallel")]
    let results: Vec<T> = (0..simulations)
        .into_par_iter()
        .map(|i| {
            let mut rep_rng = StdRng::seed_from_u64(counter_seed(base_seed, i as u64));
            replicate(&mut rep_rng)
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<T> = (0..simulations)
        .map(|i| {
            let mut rep_rng = StdRng::seed_from_u64(counter_seed(base_seed, i as u64));
            replicate(&mut rep_rng)
        })
        .collect();

    Ok(results)
}
