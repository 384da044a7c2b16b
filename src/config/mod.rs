//! Configuration management.
//!
//! TOML-backed, with validated loads and sensible defaults. Sections:
//!
//! - [`GameConfig`] - trip limits and production toggles
//! - [`StorageConfig`] - sled data directory
//! - [`BlacklistConfig`] - refresh cadence for the blacklist cache
//! - [`LoggingConfig`] - log level handed to the host's logger
//!
//! Hosts load once at startup:
//!
//! ```rust,no_run
//! use minionbot::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("data dir: {}", config.storage.data_dir);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Production mode enables background refresh loops.
    #[serde(default)]
    pub production: bool,
    /// Base maximum trip length, before perk bonuses.
    #[serde(default = "default_max_trip_minutes")]
    pub max_trip_minutes: u32,
    /// Channel announcements about sponsors are posted to.
    #[serde(default)]
    pub sponsor_channel_id: String,
}

fn default_max_trip_minutes() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistConfig {
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
}

fn default_refresh_minutes() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub storage: StorageConfig,
    pub blacklist: BlacklistConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                production: false,
                max_trip_minutes: default_max_trip_minutes(),
                sponsor_channel_id: String::new(),
            },
            storage: StorageConfig {
                data_dir: default_data_dir(),
            },
            blacklist: BlacklistConfig {
                refresh_minutes: default_refresh_minutes(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file, for first-run setup.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config)?;
        fs::write(path, raw).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.max_trip_minutes == 0 {
            return Err(anyhow!("game.max_trip_minutes must be greater than zero"));
        }
        if self.blacklist.refresh_minutes == 0 {
            return Err(anyhow!("blacklist.refresh_minutes must be greater than zero"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("unknown logging.level: {}", other)),
        }
    }

    pub fn max_trip_length(&self) -> Duration {
        Duration::from_secs(u64::from(self.game.max_trip_minutes) * 60)
    }

    pub fn blacklist_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.blacklist.refresh_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn zero_trip_length_is_rejected() {
        let mut config = Config::default();
        config.game.max_trip_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn written_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();
        tokio_test::block_on(async {
            Config::create_default(path).await.unwrap();
            let loaded = Config::load(path).await.unwrap();
            assert_eq!(loaded.game.max_trip_minutes, 30);
            assert_eq!(loaded.storage.data_dir, "data");
        });
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [game]
            production = true
            [storage]
            [blacklist]
            [logging]
            "#,
        )
        .unwrap();
        assert!(config.game.production);
        assert_eq!(config.game.max_trip_minutes, 30);
        assert_eq!(config.blacklist.refresh_minutes, 10);
        assert_eq!(
            config.blacklist_refresh_interval(),
            Duration::from_secs(600)
        );
    }
}
