//----------------------------------------
// sample size mod
//----------------------------------------
pub mod anova;
pub mod binary;
pub(crate) mod critical;
pub mod continuous;
pub mod non_inferiority;
pub mod survival;
pub mod types;

pub use anova::sample_size_anova;
pub use binary::{power_proportion, sample_size_proportion};
pub use continuous::{power_t_test, sample_size_t_test};
pub use non_inferiority::{sample_size_non_inferiority, sample_size_non_inferiority_continuous};
pub use survival::{power_survival, sample_size_survival};
pub use types::{AnovaSampleSize, PowerResult, SampleSizeResult};
