//! Debounce configuration
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! delay_ms = 300
//! flush_on_close = true
//! ```

use crate::error::{DebounceError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for `delay_ms` (one minute)
pub const MAX_DELAY_MS: u64 = 60_000;

/// Debounce configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period before the last call runs, in milliseconds (default: 300)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Run a still-pending call when its source closes (default: true)
    #[serde(default = "default_true")]
    pub flush_on_close: bool,
}

impl DebounceConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are within their valid ranges
    ///
    /// Valid ranges:
    /// - delay_ms: 0-60,000
    pub fn validate(&self) -> Result<()> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(DebounceError::InvalidDelay {
                delay_ms: self.delay_ms,
                max_ms: MAX_DELAY_MS,
            });
        }
        Ok(())
    }

    /// Delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            flush_on_close: true,
        }
    }
}

fn default_delay_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

/// Commented example configuration
pub fn example_config() -> &'static str {
    r#"# dbnc configuration

# Quiet period in milliseconds before the most recent input is emitted.
# Valid range: 0-60000
delay_ms = 300

# Emit the pending input when the input stream ends instead of dropping it.
flush_on_close = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebounceConfig::default();
        assert_eq!(config.delay_ms, 300);
        assert!(config.flush_on_close);
        assert_eq!(config.delay(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() -> Result<()> {
        let config = DebounceConfig::from_toml_str("delay_ms = 50\n")?;
        assert_eq!(config.delay_ms, 50);
        assert!(config.flush_on_close);

        let empty = DebounceConfig::from_toml_str("")?;
        assert_eq!(empty, DebounceConfig::default());
        Ok(())
    }

    #[test]
    fn test_zero_delay_is_valid() {
        let config = DebounceConfig {
            delay_ms: 0,
            flush_on_close: false,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.delay(), Duration::ZERO);
    }

    #[test]
    fn test_delay_out_of_range() {
        let err = DebounceConfig::from_toml_str("delay_ms = 60001\n").unwrap_err();
        assert!(matches!(
            err,
            DebounceError::InvalidDelay { delay_ms: 60_001, max_ms: MAX_DELAY_MS }
        ));
    }

    #[test]
    fn test_negative_delay_rejected_by_parser() {
        let err = DebounceConfig::from_toml_str("delay_ms = -5\n").unwrap_err();
        assert!(matches!(err, DebounceError::Config(_)));
    }

    #[test]
    fn test_example_config_parses() -> Result<()> {
        let config = DebounceConfig::from_toml_str(example_config())?;
        assert_eq!(config, DebounceConfig::default());
        Ok(())
    }

    #[test]
    fn test_toml_string_round_trips() -> Result<()> {
        let config = DebounceConfig {
            delay_ms: 1200,
            flush_on_close: false,
        };
        assert_eq!(DebounceConfig::from_toml_str(&config.to_toml_string()?)?, config);
        Ok(())
    }

    #[test]
    fn test_serialize_error_surfaces() {
        // A bare integer is not a TOML document
        let err: DebounceError = toml::to_string(&5u32).unwrap_err().into();
        assert!(matches!(err, DebounceError::Serialize(_)));
        assert!(err.to_string().starts_with("failed to serialize configuration"));
    }
}
