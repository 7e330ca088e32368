//----------------------------------------
// Crate error type
//----------------------------------------
use crate::config::error::ConfigError;
use crate::distribution::error::DomainError;
use crate::spending::error::SpendingFcnErr;
use crate::util::error::InvalidParameterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtdesignErr {
    #[error("invalid parameter: {0}")]
    InvalidParameter(InvalidParameterError),
    #[error("while evaluating distribution function: {0}")]
    Domain(DomainError),
    #[error("while evaluating spending function: {0}")]
    SpendingFcn(SpendingFcnErr),
    #[error("while loading configuration: {0}")]
    Config(ConfigError),
}
