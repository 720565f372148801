//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! settlement_timeout_ms = 2000
//!
//! [bonus]
//! large_stake_threshold = 25000.0
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SETTLEMENT_TIMEOUT_MS;
use crate::error::{Result, StakingError};
use crate::logging::LogConfig;
use crate::rewards::BonusPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on a single settlement call
    #[serde(default = "default_settlement_timeout_ms")]
    pub settlement_timeout_ms: u64,

    #[serde(default)]
    pub bonus: BonusPolicy,

    #[serde(default)]
    pub logging: LogConfig,
}

fn default_settlement_timeout_ms() -> u64 {
    DEFAULT_SETTLEMENT_TIMEOUT_MS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settlement_timeout_ms: default_settlement_timeout_ms(),
            bonus: BonusPolicy::default(),
            logging: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.settlement_timeout_ms == 0 {
            return Err(StakingError::InvalidConfig(
                "settlement_timeout_ms must be greater than zero".into(),
            ));
        }
        self.bonus.validate().map_err(StakingError::InvalidConfig)
    }

    pub fn settlement_timeout(&self) -> Duration {
        Duration::from_millis(self.settlement_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.settlement_timeout(), Duration::from_secs(5));
        assert_eq!(config.bonus.large_stake_threshold, 10_000.0);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            settlement_timeout_ms = 250

            [bonus]
            large_stake_threshold = 25000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.settlement_timeout_ms, 250);
        assert_eq!(config.bonus.large_stake_threshold, 25_000.0);
        assert_eq!(config.bonus.long_term_min_lock_days, 180);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = EngineConfig::from_toml_str("settlement_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, StakingError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = EngineConfig::from_toml_str("settlement_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, StakingError::ConfigParse(_)));
    }
}
