// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - prints the effective configuration

use crate::config::{self, Config};
use anyhow::Result;

/// Print the effective configuration as TOML
pub fn run(config: &Config) -> Result<()> {
    tracing::debug!("Effective config: {:?}", config);
    if let Some(path) = config::default_path() {
        println!("# default file: {}", path.display());
    }
    print!("{}", config::to_toml(config)?);
    Ok(())
}
