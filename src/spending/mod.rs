//----------------------------------------
// spending mod
//----------------------------------------
pub mod error;
pub mod spending_fcns;
pub mod types;

pub use spending_fcns::{alpha_spending_schedule, compute_spending_vec, equally_spaced_looks};
pub use types::{AlphaSpendingSchedule, SpendingFcn};
