//----------------------------------------
// configuration errors
//----------------------------------------
use crate::error::CtdesignErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not write TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<ConfigError> for CtdesignErr {
    fn from(e: ConfigError) -> CtdesignErr {
        CtdesignErr::Config(e)
    }
}
