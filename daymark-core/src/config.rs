//! Global daymark configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaymarkError, DaymarkResult};
use crate::event::DEFAULT_REMINDER_MINUTES;

static DEFAULT_DATA_DIR: &str = "~/.local/share/daymark";

const STORE_FILE: &str = "daymark.json";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_reminder_minutes() -> i64 {
    DEFAULT_REMINDER_MINUTES
}

fn is_default_reminder_minutes(m: &i64) -> bool {
    *m == DEFAULT_REMINDER_MINUTES
}

/// Configuration at ~/.config/daymark/config.toml
///
/// Every key can be overridden with a `DAYMARK_`-prefixed environment
/// variable, e.g. `DAYMARK_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DaymarkConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Category name new events go to when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,

    #[serde(
        default = "default_reminder_minutes",
        skip_serializing_if = "is_default_reminder_minutes"
    )]
    pub default_reminder_minutes: i64,
}

impl Default for DaymarkConfig {
    fn default() -> Self {
        DaymarkConfig {
            data_dir: default_data_dir(),
            default_category: None,
            default_reminder_minutes: DEFAULT_REMINDER_MINUTES,
        }
    }
}

impl DaymarkConfig {
    pub fn config_path() -> DaymarkResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaymarkError::Config("Could not determine config directory".into()))?
            .join("daymark");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, creating a commented default file on first run.
    pub fn load() -> DaymarkResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file, layered with environment overrides.
    pub fn load_from(path: &Path) -> DaymarkResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DAYMARK"))
            .build()
            .map_err(|e| DaymarkError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaymarkError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Path of the JSON record store inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_path().join(STORE_FILE)
    }

    /// Save the current config to ~/.config/daymark/config.toml
    pub fn save(&self) -> DaymarkResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> DaymarkResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaymarkError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| DaymarkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaymarkResult<()> {
        let contents = format!(
            "\
# daymark configuration

# Where your events are stored:
# data_dir = \"{}\"

# Category for new events when --category is not given:
# default_category = \"Life\"

# Minutes before an event to remind you:
# default_reminder_minutes = {}
",
            DEFAULT_DATA_DIR, DEFAULT_REMINDER_MINUTES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaymarkError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaymarkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_default_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        DaymarkConfig::create_default_config(&path).unwrap();
        let cfg = DaymarkConfig::load_from(&path).unwrap();

        assert_eq!(cfg.data_dir, default_data_dir());
        assert_eq!(cfg.default_category, None);
        assert_eq!(cfg.default_reminder_minutes, DEFAULT_REMINDER_MINUTES);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = DaymarkConfig {
            data_dir: dir.path().join("data"),
            default_category: Some("Work".to_string()),
            default_reminder_minutes: 60,
        };
        cfg.save_to(&path).unwrap();

        let loaded = DaymarkConfig::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, dir.path().join("data"));
        assert_eq!(loaded.default_category.as_deref(), Some("Work"));
        assert_eq!(loaded.default_reminder_minutes, 60);
        assert_eq!(loaded.store_path(), dir.path().join("data").join(STORE_FILE));
    }

    #[test]
    fn default_values_are_not_written() {
        let text = toml::to_string_pretty(&DaymarkConfig::default()).unwrap();
        assert!(text.trim().is_empty(), "unexpected config body: {text}");
    }
}
