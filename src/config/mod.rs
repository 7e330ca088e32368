//----------------------------------------
// config mod
//----------------------------------------
pub mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adaptive::types::AdaptiveSettings;
use crate::bayesian::types::BayesianSettings;
use crate::config::error::ConfigError;
use crate::error::CtdesignErr;
use crate::group_sequential::types::GroupSequentialSettings;
use crate::prior_feed::feed::{DEFAULT_DROPOUT_RATE, HistoricalPriorFeed, resolve_dropout};
use crate::prior_feed::types::PriorQuery;
use crate::util::validate::{check_alpha, check_alpha_power, check_positive, check_proportion, check_rate};

/// Values used when a design does not state its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultDesignParams {
    pub alpha: f64,
    pub power: f64,
    pub ratio: f64,
    pub dropout_rate: f64,
    /// One-sided alpha for non-inferiority designs
    pub non_inferiority_alpha: f64,
    /// Posterior probability required by Bayesian designs
    pub posterior_threshold: f64,
}

impl Default for DefaultDesignParams {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            power: 0.8,
            ratio: 1.0,
            dropout_rate: DEFAULT_DROPOUT_RATE,
            non_inferiority_alpha: 0.025,
            posterior_threshold: 0.95,
        }
    }
}

impl DefaultDesignParams {
    /// Explicit dropout, then the feed, then the configured `dropout_rate`
    pub fn resolve_dropout<F: HistoricalPriorFeed + ?Sized>(
        &self,
        explicit: Option<f64>,
        feed: &F,
        query: &PriorQuery,
    ) -> Result<f64, CtdesignErr> {
        resolve_dropout(explicit, feed, query, self.dropout_rate)
    }
}

/// Every knob of the calculators and simulators; any table or field left
/// out of a TOML file takes its default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub defaults: DefaultDesignParams,
    pub group_sequential: GroupSequentialSettings,
    pub adaptive: AdaptiveSettings,
    pub bayesian: BayesianSettings,
}

impl DesignConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CtdesignErr> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CtdesignErr> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading design configuration");
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, CtdesignErr> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), CtdesignErr> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Domain checks on the default design parameters; simulator settings
    /// are checked by the simulators themselves
    pub fn validate(&self) -> Result<(), CtdesignErr> {
        let d = &self.defaults;
        check_alpha_power(d.alpha, d.power)?;
        check_alpha(d.non_inferiority_alpha)?;
        check_proportion("posterior probability threshold", d.posterior_threshold)?;
        check_positive("allocation ratio", d.ratio)?;
        check_rate("dropout rate", d.dropout_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::types::FinalStatistic;
    use crate::group_sequential::types::StageStatistic;
    use crate::prior_feed::feed::NoHistoricalFeed;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DesignConfig::from_toml_str("").unwrap();
        assert_eq!(config, DesignConfig::default());
        assert_eq!(config.group_sequential.simulations, 10_000);
        assert_eq!(config.group_sequential.max_inflation, 0.10);
        assert_eq!(config.adaptive.scenario_multipliers, vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(config.bayesian.max_n, 10_000);
        assert_eq!(config.defaults.dropout_rate, 0.1);
    }

    #[test]
    fn partial_tables_override() {
        let content = r#"
            [defaults]
            alpha = 0.025
            power = 0.9

            [group_sequential]
            simulations = 2000
            stage_statistic = "cumulative"

            [adaptive]
            final_statistic = "inverse_normal"

            [adaptive.promising_zone]
            upper = 2.0

            [bayesian]
            max_n = 500
        "#;
        let config = DesignConfig::from_toml_str(content).unwrap();
        assert_eq!(config.defaults.alpha, 0.025);
        assert_eq!(config.defaults.power, 0.9);
        assert_eq!(config.defaults.ratio, 1.0);
        assert_eq!(config.group_sequential.simulations, 2_000);
        assert_eq!(config.group_sequential.stage_statistic, StageStatistic::Cumulative);
        assert!(config.group_sequential.simulate_null);
        assert_eq!(config.adaptive.promising_zone.upper, 2.0);
        assert_eq!(config.adaptive.promising_zone.lower, 0.5);
        assert_eq!(config.adaptive.final_statistic, FinalStatistic::InverseNormal);
        assert_eq!(config.bayesian.max_n, 500);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = DesignConfig::default();
        config.adaptive.scenario_multipliers = vec![0.0, 1.0, 2.0];
        config.defaults.ratio = 2.0;
        let text = config.to_toml_string().unwrap();
        assert_eq!(DesignConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn json_round_trip() {
        let config = DesignConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: DesignConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.toml");
        let mut config = DesignConfig::default();
        config.bayesian.max_n = 250;
        config.save(&path).unwrap();
        assert_eq!(DesignConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_error() {
        let result = DesignConfig::load(Path::new("/nonexistent/design.toml"));
        assert!(matches!(result, Err(CtdesignErr::Config(ConfigError::Io { .. }))));
    }

    #[test]
    fn malformed_toml_error() {
        let result = DesignConfig::from_toml_str("[defaults\nalpha = ");
        assert!(matches!(result, Err(CtdesignErr::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn posterior_threshold_error() {
        if let Err(e) = DesignConfig::from_toml_str("[defaults]\nposterior_threshold = 1.5") {
            assert_eq!(
                String::from(
                    "invalid parameter: posterior probability threshold should be in (0, 1); got 1.5"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn configured_dropout_is_the_fallback() {
        let config = DesignConfig::from_toml_str("[defaults]\ndropout_rate = 0.25").unwrap();
        let query = PriorQuery::new("asthma", "fev1");
        let defaults = &config.defaults;
        assert_eq!(defaults.resolve_dropout(None, &NoHistoricalFeed, &query).unwrap(), 0.25);
        assert_eq!(defaults.resolve_dropout(Some(0.05), &NoHistoricalFeed, &query).unwrap(), 0.05);
    }

    #[test]
    fn invalid_defaults_rejected() {
        if let Err(e) = DesignConfig::from_toml_str("[defaults]\nalpha = 1.5") {
            assert_eq!(
                String::from("invalid parameter: alpha should be in (0, 1); got 1.5"),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }
}
