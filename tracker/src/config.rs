use std::path::Path;

use serde::{Deserialize, Serialize};
use types::MatchFormat;

use crate::TrackerError;

fn default_autosave_interval_secs() -> u64 {
    5
}

fn default_planned_duration() -> u32 {
    50
}

fn default_format() -> MatchFormat {
    MatchFormat::SevenASide
}

/// Settings read from the tracker's YAML file. Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,
    #[serde(default = "default_planned_duration")]
    pub default_planned_duration: u32,
    #[serde(default = "default_format")]
    pub default_format: MatchFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            autosave_interval_secs: default_autosave_interval_secs(),
            default_planned_duration: default_planned_duration(),
            default_format: default_format(),
        }
    }
}

impl TrackerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TrackerError> {
        let config: TrackerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        log::info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Reads `path` when given, otherwise falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, TrackerError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn autosave_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.autosave_interval_secs as i64)
    }

    fn validate(&self) -> Result<(), TrackerError> {
        if self.default_planned_duration == 0 || self.default_planned_duration % 2 != 0 {
            return Err(TrackerError::Config(format!(
                "default_planned_duration must be a positive even number of minutes, got {}",
                self.default_planned_duration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = TrackerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.autosave_interval(), chrono::Duration::seconds(5));
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
database_url: "sqlite://season.db"
autosave_interval_secs: 10
default_planned_duration: 60
default_format: "9v9"
"#;
        let config = TrackerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite://season.db"));
        assert_eq!(config.autosave_interval_secs, 10);
        assert_eq!(config.default_planned_duration, 60);
        assert_eq!(config.default_format, MatchFormat::NineASide);
    }

    #[test]
    fn test_odd_duration_rejected() {
        let result = TrackerConfig::from_yaml_str("default_planned_duration: 45");
        assert!(matches!(result, Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TrackerConfig::load(Path::new("/nonexistent/tracker.yaml"));
        assert!(matches!(result, Err(TrackerError::Io(_))));
    }
}
