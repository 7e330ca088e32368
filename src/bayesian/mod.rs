//----------------------------------------
// bayesian mod
//----------------------------------------
pub mod prior;
pub mod search;
pub mod types;

pub use prior::PriorDistribution;
pub use search::bayesian_sample_size;
pub use types::{ArmPrior, BayesianDesign, BayesianSettings, NonConvergenceWarning, SearchStatus};
