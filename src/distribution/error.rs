//----------------------------------------
// distribution errors
//----------------------------------------
use crate::error::CtdesignErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("arguments to quantile function should be in (0, 1); got {0}")]
    QuantileOutOfBounds(f64),
    #[error("standard deviation should be positive; got {0}")]
    NonPositiveScale(f64),
    #[error("{fcn} is only defined for positive arguments; got {value}")]
    NonPositiveArgument { fcn: &'static str, value: f64 },
    #[error("degrees of freedom should be positive; got ({df1}, {df2})")]
    DegreesOfFreedom { df1: f64, df2: f64 },
    #[error("F quantile approximation has no solution for p = {p} with ({df1}, {df2}) degrees of freedom")]
    FApproximation { p: f64, df1: f64, df2: f64 },
}

impl From<DomainError> for CtdesignErr {
    fn from(e: DomainError) -> CtdesignErr {
        CtdesignErr::Domain(e)
    }
}
