/// Configuration for the migration registry
use crate::models::version::BASELINE_VERSION;
use crate::services::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Registry behavior settings
///
/// None of these settings change which steps `migrate` selects. They only
/// affect registration-time diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Version meaning "no migrations applied yet"
    pub baseline_version: i32,

    /// Warn when a step targets a version at or below the baseline.
    /// Such a step only runs if a caller passes a `from` below the baseline.
    pub warn_on_unreachable_steps: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            baseline_version: BASELINE_VERSION,
            warn_on_unreachable_steps: true,
        }
    }
}

impl MigrationConfig {
    /// Parse configuration from a JSON document, filling omitted fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.baseline_version < BASELINE_VERSION {
            return Err(MigrationError::invalid_config(format!(
                "baseline_version cannot be below {}",
                BASELINE_VERSION
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = MigrationConfig::default();
        assert_eq!(config.baseline_version, 0);
        assert!(config.warn_on_unreachable_steps);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MigrationConfig::default();

        config.baseline_version = 5;
        assert!(config.validate().is_ok());

        config.baseline_version = -1;
        assert!(matches!(
            config.validate(),
            Err(MigrationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MigrationConfig::from_json_str(r#"{"warnOnUnreachableSteps": false}"#).unwrap();
        assert_eq!(config.baseline_version, 0);
        assert!(!config.warn_on_unreachable_steps);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = MigrationConfig::from_json_str(r#"{"baselineVersion": "zero"}"#);
        assert!(matches!(result, Err(MigrationError::Serialization(_))));

        let result = MigrationConfig::from_json_str(r#"{"baselineVersion": -3}"#);
        assert!(matches!(result, Err(MigrationError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"baselineVersion": 2}}"#).unwrap();

        let config = MigrationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.baseline_version, 2);
        assert!(config.warn_on_unreachable_steps);
    }

    #[test]
    fn test_missing_file() {
        let result = MigrationConfig::from_file("/nonexistent/migrations.json");
        assert!(matches!(result, Err(MigrationError::Io(_))));
    }
}
