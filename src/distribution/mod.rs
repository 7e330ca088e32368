//----------------------------------------
// distribution mod
//----------------------------------------
pub mod error;
pub mod f_dist;
pub mod gamma;
pub mod random;
pub mod std_normal;

pub use f_dist::inverse_f;
pub use gamma::{beta_pdf, log_beta, log_gamma, log_normal_pdf};
pub use random::{design_rng, standard_normal};
pub use std_normal::{normal_cdf, std_normal_cdf, std_normal_pdf, std_normal_quantile};
