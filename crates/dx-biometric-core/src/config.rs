//! Configuration for the biometric façade
//!
//! Values are loaded from TOML, optionally overridden from the environment,
//! and validated before use:
//!
//! ```toml
//! default_reason = "Unlock your vault"
//! default_fallback_title = "Use Passcode"
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`BiometricConfig::default_reason`]
pub const ENV_DEFAULT_REASON: &str = "DX_BIOMETRIC_DEFAULT_REASON";

/// Environment variable overriding [`BiometricConfig::default_fallback_title`].
///
/// An empty value clears the title.
pub const ENV_FALLBACK_TITLE: &str = "DX_BIOMETRIC_FALLBACK_TITLE";

/// Prompt reason used when neither the caller nor the config supplies one
pub const DEFAULT_REASON: &str = "Authenticate to continue";

/// Façade configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BiometricConfig {
    /// Reason substituted when the caller passes a blank one
    pub default_reason: String,
    /// Fallback button title used when the caller passes none
    pub default_fallback_title: Option<String>,
}

impl Default for BiometricConfig {
    fn default() -> Self {
        Self {
            default_reason: DEFAULT_REASON.to_string(),
            default_fallback_title: None,
        }
    }
}

impl BiometricConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loading biometric config");
        Self::from_toml_str(&contents)
    }

    /// Apply overrides from the process environment.
    ///
    /// Only the `DX_BIOMETRIC_*` variables are read; a value that is not
    /// valid UTF-8 is rejected.
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        let mut vars = Vec::new();
        for (key, field) in [
            (ENV_DEFAULT_REASON, "default_reason"),
            (ENV_FALLBACK_TITLE, "default_fallback_title"),
        ] {
            if let Some(value) = std::env::var_os(key) {
                let value = value.into_string().map_err(|_| {
                    ConfigError::invalid_value(field, format!("{key} is not valid UTF-8"))
                })?;
                vars.push((key, value));
            }
        }
        self.merge_with_env_from(vars)
    }

    /// Apply overrides from an explicit set of variables.
    ///
    /// Either every override is applied or, on error, none is.
    pub fn merge_with_env_from<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut merged = self.clone();
        for (key, value) in vars {
            match key.as_ref() {
                ENV_DEFAULT_REASON => merged.default_reason = value.into(),
                ENV_FALLBACK_TITLE => {
                    let title: String = value.into();
                    merged.default_fallback_title = (!title.is_empty()).then_some(title);
                }
                _ => {}
            }
        }

        merged.validate()?;
        *self = merged;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_reason.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "default_reason",
                "the host will not present a prompt without a reason",
            ));
        }

        if let Some(title) = &self.default_fallback_title {
            if title.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "default_fallback_title",
                    "must not be blank; omit it instead",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BiometricConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_reason, DEFAULT_REASON);
        assert_eq!(config.default_fallback_title, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BiometricConfig::from_toml_str("default_fallback_title = \"Use Passcode\"")
            .unwrap();
        assert_eq!(config.default_reason, DEFAULT_REASON);
        assert_eq!(config.default_fallback_title.as_deref(), Some("Use Passcode"));
    }

    #[test]
    fn test_blank_reason_rejected() {
        let err = BiometricConfig::from_toml_str("default_reason = \"  \"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "default_reason",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = BiometricConfig::from_toml_str("retries = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BiometricConfig::default();
        config
            .merge_with_env_from([
                (ENV_DEFAULT_REASON, "Confirm payment"),
                (ENV_FALLBACK_TITLE, "Enter PIN"),
                ("UNRELATED", "ignored"),
            ])
            .unwrap();
        assert_eq!(config.default_reason, "Confirm payment");
        assert_eq!(config.default_fallback_title.as_deref(), Some("Enter PIN"));

        config
            .merge_with_env_from([(ENV_FALLBACK_TITLE, "")])
            .unwrap();
        assert_eq!(config.default_fallback_title, None);
    }

    #[test]
    fn test_env_override_validated() {
        let mut config = BiometricConfig::default();
        assert!(config
            .merge_with_env_from([(ENV_DEFAULT_REASON, "")])
            .is_err());
    }

    #[test]
    fn test_rejected_env_merge_leaves_config_untouched() {
        let mut config = BiometricConfig::default();
        let result = config.merge_with_env_from([
            (ENV_FALLBACK_TITLE, "Enter PIN"),
            (ENV_DEFAULT_REASON, " "),
        ]);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "default_reason",
                ..
            })
        ));
        assert_eq!(config, BiometricConfig::default());
    }
}
