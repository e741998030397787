//! Optional TOML configuration for the command-line front end.
//!
//! ```toml
//! currency_symbol = "₦"
//! schedules_file = "schedules/2025.csv"
//! log_level = "debug"
//! development_levy_rate = "0.04"
//! ```
//!
//! Command-line flags take precedence over the file; anything left unset
//! falls back to the built-in regime.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::TaxRegime;
use tax_core::schedules::DEVELOPMENT_LEVY_RATE;
use tax_data::{ScheduleLoader, ScheduleLoaderError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleLoaderError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub currency_symbol: String,
    pub schedules_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub development_levy_rate: Option<Decimal>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₦".to_string(),
            schedules_file: None,
            log_level: None,
            development_levy_rate: None,
        }
    }
}

impl CliConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn levy_rate(&self) -> Decimal {
        self.development_levy_rate.unwrap_or(DEVELOPMENT_LEVY_RATE)
    }

    /// Resolves the regime to calculate with. `schedules_override` (from the
    /// command line) wins over `schedules_file`.
    pub fn regime(
        &self,
        schedules_override: Option<&Path>,
    ) -> Result<TaxRegime, ConfigError> {
        match schedules_override.or(self.schedules_file.as_deref()) {
            Some(path) => {
                info!(path = %path.display(), "loading schedules");
                Ok(ScheduleLoader::load_file(path, self.levy_rate())?)
            }
            None => {
                let mut regime =
                    TaxRegime::nigeria_2025().map_err(ScheduleLoaderError::Schedule)?;
                regime.development_levy_rate = self.levy_rate();
                Ok(regime)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();

        assert_eq!(config, CliConfig::default());
        assert_eq!(config.currency_symbol, "₦");
        assert_eq!(config.levy_rate(), dec!(0.04));
    }

    #[test]
    fn parses_all_fields() {
        let config = CliConfig::from_toml_str(
            r#"
currency_symbol = "NGN "
schedules_file = "rates.csv"
log_level = "debug"
development_levy_rate = "0.05"
"#,
        )
        .unwrap();

        assert_eq!(config.currency_symbol, "NGN ");
        assert_eq!(config.schedules_file, Some(PathBuf::from("rates.csv")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.levy_rate(), dec!(0.05));
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(matches!(
            CliConfig::from_toml_str("currency_symbol = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn regime_defaults_to_built_in_tables() {
        let regime = CliConfig::default().regime(None).unwrap();

        assert_eq!(regime, TaxRegime::nigeria_2025().unwrap());
    }

    #[test]
    fn regime_applies_levy_override() {
        let config = CliConfig {
            development_levy_rate: Some(dec!(0.02)),
            ..CliConfig::default()
        };

        assert_eq!(config.regime(None).unwrap().development_levy_rate, dec!(0.02));
    }

    #[test]
    fn regime_reports_missing_schedule_file() {
        let result = CliConfig::default().regime(Some(Path::new("missing/schedules.csv")));

        assert!(matches!(
            result,
            Err(ConfigError::Schedule(ScheduleLoaderError::Io { .. }))
        ));
    }
}
