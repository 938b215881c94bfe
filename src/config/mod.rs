//! Configuration management.
//!
//! One TOML file drives a migration run: where the legacy area files
//! live, how many files migrate in parallel, where each record kind's
//! backend service listens, and how loudly to log. Defaults mirror the
//! original deployment (one service per record kind on consecutive
//! ports), so `arealift init` produces a config that works against a
//! local stack unchanged.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Directory scanned for `*.are` files.
    pub area_dir: String,
    /// Parallel file workers. Each file is independent; within a file,
    /// records still go out area-first.
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    pub area_url: String,
    pub room_url: String,
    pub mobile_url: String,
    pub item_url: String,
    pub shop_url: String,
    pub reset_url: String,
    pub special_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace.
    pub level: String,
    /// Optional log file; appended to alongside console output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            area_dir: "./area".to_string(),
            workers: 4,
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            area_url: "http://localhost:8082/api/v1/".to_string(),
            room_url: "http://localhost:8083/api/v1/".to_string(),
            mobile_url: "http://localhost:8084/api/v1/".to_string(),
            item_url: "http://localhost:8085/api/v1/".to_string(),
            shop_url: "http://localhost:8086/api/v1/".to_string(),
            reset_url: "http://localhost:8087/api/v1/".to_string(),
            special_url: "http://localhost:8088/api/v1/".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config file {}", path))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("parsing config file {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a starter configuration file with the defaults.
    pub async fn create_default(path: &str) -> Result<()> {
        let serialized = toml::to_string_pretty(&Config::default())?;
        fs::write(path, serialized)
            .await
            .with_context(|| format!("writing config file {}", path))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.migration.workers == 0 {
            return Err(anyhow!("migration.workers must be at least 1"));
        }
        let urls = [
            ("sink.area_url", &self.sink.area_url),
            ("sink.room_url", &self.sink.room_url),
            ("sink.mobile_url", &self.sink.mobile_url),
            ("sink.item_url", &self.sink.item_url),
            ("sink.shop_url", &self.sink.shop_url),
            ("sink.reset_url", &self.sink.reset_url),
            ("sink.special_url", &self.sink.special_url),
        ];
        for (key, url) in urls {
            if url.is_empty() {
                return Err(anyhow!("{} must not be empty", key));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_workers_rejected() {
        let mut config = Config::default();
        config.migration.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config =
            toml::from_str("[migration]\narea_dir = \"/tmp/areas\"\nworkers = 2\n").expect("parse");
        assert_eq!(config.migration.area_dir, "/tmp/areas");
        assert_eq!(config.sink.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }
}
