//! Configuration file support for Tiny Habits.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/tinyhabits/config.toml`.

use crate::{Error, HabitCategory, HabitFrequency, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Values applied to new habits when the command line leaves them out
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_icon")]
    pub icon: String,

    #[serde(default = "default_category")]
    pub category: HabitCategory,

    #[serde(default = "default_frequency")]
    pub frequency: HabitFrequency,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            category: default_category(),
            frequency: default_frequency(),
        }
    }
}

/// Output configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Length of the progress strip
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_days: default_history_days(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local/share")
    });
    base.join("tinyhabits")
}

fn default_icon() -> String {
    "circle".into()
}

fn default_category() -> HabitCategory {
    HabitCategory::Custom
}

fn default_frequency() -> HabitFrequency {
    HabitFrequency::Daily
}

fn default_history_days() -> u32 {
    7
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the CLI cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.display.history_days == 0 || self.display.history_days > 31 {
            return Err(Error::Config(format!(
                "display.history_days must be between 1 and 31, got {}",
                self.display.history_days
            )));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        base.join("tinyhabits").join("config.toml")
    }
}
