//----------------------------------------
// parameter errors
//----------------------------------------
use crate::error::CtdesignErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidParameterError {
    #[error("alpha should be in (0, 1); got {0}")]
    Alpha(f64),
    #[error("power should be in (0, 1); got {0}")]
    Power(f64),
    #[error("{name} should be positive; got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} should be non-negative; got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} should be in (0, 1); got {value}")]
    Proportion { name: &'static str, value: f64 },
    #[error("{name} should be in [0, 1); got {value}")]
    Rate { name: &'static str, value: f64 },
    #[error("{name} should be nonzero")]
    ZeroEffect { name: &'static str },
    #[error("{name} should be finite; got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{lower_name} ({lower}) should not exceed {upper_name} ({upper})")]
    Ordering {
        lower_name: &'static str,
        lower: f64,
        upper_name: &'static str,
        upper: f64,
    },
    #[error("at least {min} groups are required; got {got}")]
    TooFewGroups { min: usize, got: usize },
    #[error("required sample size {0} is too large to represent")]
    SampleSizeTooLarge(f64),
    #[error("number of simulations should be positive")]
    NoSimulations,
    #[error("look {look} has no patients (maximum sample size {max_n} is too small for {looks} looks)")]
    EmptyStage {
        look: usize,
        max_n: usize,
        looks: usize,
    },
    #[error("no {name} was supplied and no historical estimate is available")]
    MissingInput { name: &'static str },
}

impl From<InvalidParameterError> for CtdesignErr {
    fn from(e: InvalidParameterError) -> CtdesignErr {
        CtdesignErr::InvalidParameter(e)
    }
}
