// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::finder::Metric;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `ROUTEMAP_METRIC=time`
const ENV_PREFIX: &str = "ROUTEMAP";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Map file used when no `--map` is given
    pub map: Option<PathBuf>,
    /// Metric used when no `--metric` is given
    pub metric: Metric,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            map: None,
            metric: Metric::Distance,
        }
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "routemap")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from disk and the environment, falling back to defaults.
///
/// An explicitly given file must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        None => {
            if let Some(default) = default_path() {
                builder = builder.add_source(config::File::from(default).required(false));
            }
        }
    }

    builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

/// Serialize the configuration as TOML
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.metric, Metric::Distance);
        assert!(config.map.is_none());
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("routemap.toml");
        fs::write(&path, "metric = \"time\"\nmap = \"/srv/maps/city.dot\"\n").unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.metric, Metric::Time);
        assert_eq!(config.map, Some(PathBuf::from("/srv/maps/city.dot")));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();

        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = Config {
            log_level: "debug".into(),
            map: None,
            metric: Metric::Time,
        };

        let text = to_toml(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }
}
