//! Engine configuration

use serde::{Deserialize, Serialize};

/// What the engine does when a predicate errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectPolicy {
    /// Fail the whole call with [`ValidateError::Defect`](crate::ValidateError::Defect).
    #[default]
    Fatal,
    /// Record the defect as a [`FieldError`](crate::FieldError) with
    /// [`ErrorOrigin::Defect`](crate::ErrorOrigin::Defect) and keep going.
    Report,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The nested key separator is empty.
    #[error("key separator must not be empty")]
    EmptySeparator,

    /// The configuration document could not be parsed.
    #[error("invalid validator configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a [`Validator`](crate::Validator).
///
/// # Examples
///
/// ```
/// use verity_validator::config::{DefectPolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json(r#"{"key_separator": "/", "defect_policy": "report"}"#)?;
/// assert_eq!(config.key_separator, "/");
/// assert_eq!(config.defect_policy, DefectPolicy::Report);
/// # Ok::<(), verity_validator::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Joins parent and child attribute names in nested error keys.
    pub key_separator: String,

    /// Handling of predicate errors.
    pub defect_policy: DefectPolicy,

    /// Template for reported defects; rendered with the attribute value.
    pub defect_message: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            key_separator: ".".to_owned(),
            defect_policy: DefectPolicy::Fatal,
            defect_message: "could not be validated".to_owned(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and checks a JSON configuration document.
    ///
    /// Missing fields take their default values.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(())
    }

    /// Sets the nested key separator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_separator = separator.into();
        self
    }

    /// Sets the defect policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_defect_policy(mut self, policy: DefectPolicy) -> Self {
        self.defect_policy = policy;
        self
    }

    /// Sets the template used for reported defects.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_defect_message(mut self, message: impl Into<String>) -> Self {
        self.defect_message = message.into();
        self
    }
}
