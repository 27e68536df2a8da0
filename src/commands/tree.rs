// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Tree command - prints the map with every shortest route from one place bold

use super::{write_lines, QueryContext};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run the tree command
pub fn run(ctx: &QueryContext, from: &str, output: Option<PathBuf>) -> Result<()> {
    info!("Routing everything reachable from {} by {}", from, ctx.metric);

    let mut map = ctx.open()?;
    if map.graph().find_node(from).is_none() {
        warn!("{} is not on the map", from);
    }
    let lines = map.reachable_routes(from, ctx.metric);

    write_lines(&lines, output.as_deref())
}
