// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route command - prints the map with the best route marked bold

use super::{write_lines, QueryContext};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Run the route command
pub fn run(ctx: &QueryContext, from: &str, to: &str, output: Option<PathBuf>) -> Result<()> {
    info!("Routing {} -> {} by {}", from, to, ctx.metric);

    let mut map = ctx.open()?;
    let lines = map.route(from, to, ctx.metric);

    write_lines(&lines, output.as_deref())
}
