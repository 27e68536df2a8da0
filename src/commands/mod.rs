// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod cost;
pub mod route;
pub mod tree;

use crate::config::Config;
use crate::finder::Metric;
use crate::navigator::RouteMap;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings shared by every query command
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Map file to query
    pub map: PathBuf,
    /// Metric to use
    pub metric: Metric,
}

impl QueryContext {
    /// Merge command-line overrides over the configuration
    pub fn resolve(config: &Config, map: Option<PathBuf>, metric: Option<Metric>) -> Result<Self> {
        let map = map.or_else(|| config.map.clone()).ok_or_else(|| {
            anyhow::anyhow!("No map given. Pass --map or set `map` in the configuration")
        })?;
        Ok(Self {
            map,
            metric: metric.unwrap_or(config.metric),
        })
    }

    /// Load the map file
    pub fn open(&self) -> Result<RouteMap> {
        info!("Loading map {}", self.map.display());
        RouteMap::load(&self.map)
    }
}

/// Write rendered lines to a file or stdout
pub fn write_lines(lines: &[String], output: Option<&Path>) -> Result<()> {
    let mut content = lines.join("\n");
    content.push('\n');

    match output {
        Some(path) => {
            fs::write(path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            info!("Wrote {} lines to {}", lines.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            map: Some("from-config.dot".into()),
            metric: Metric::Time,
            ..Config::default()
        };

        let ctx =
            QueryContext::resolve(&config, Some("flag.dot".into()), Some(Metric::Distance))
                .unwrap();
        assert_eq!(ctx.map, PathBuf::from("flag.dot"));
        assert_eq!(ctx.metric, Metric::Distance);

        let ctx = QueryContext::resolve(&config, None, None).unwrap();
        assert_eq!(ctx.map, PathBuf::from("from-config.dot"));
        assert_eq!(ctx.metric, Metric::Time);
    }

    #[test]
    fn test_map_is_required() {
        assert!(QueryContext::resolve(&Config::default(), None, None).is_err());
    }

    #[test]
    fn test_write_lines_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.dot");

        write_lines(&["Digraph {".into(), "}".into()], Some(&path)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Digraph {\n}\n");
    }
}
