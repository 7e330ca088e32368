//----------------------------------------
// spending errors
//----------------------------------------
use crate::error::CtdesignErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SpendingFcnErr {
    #[error("arguments to spending function should be in (0, 1]; got {0}")]
    OutOfBounds(f64),
    #[error("look fractions should end with 1.0; got {0}")]
    BadLastFraction(f64),
    #[error("look fractions should be strictly increasing")]
    NotIncreasing,
    #[error("time vector was empty")]
    TimeVectorEmpty,
    #[error("total alpha spent should be in (0, 1); got {0}")]
    BadAlpha(f64),
    #[error("custom spend has {spend} values for {looks} looks")]
    MismatchedLengths { looks: usize, spend: usize },
    #[error("custom spend should be non-decreasing, within [0, alpha], and end at alpha ({alpha}); got {last}")]
    BadCustomSpend { alpha: f64, last: f64 },
}

impl From<SpendingFcnErr> for CtdesignErr {
    fn from(e: SpendingFcnErr) -> CtdesignErr {
        CtdesignErr::SpendingFcn(e)
    }
}
