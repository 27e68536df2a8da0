// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Cost command - prints the distance or time of the best route

use super::QueryContext;
use crate::finder::Metric;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// JSON form of a cost query
#[derive(Debug, Serialize)]
pub struct CostReport<'a> {
    /// Source place
    pub from: &'a str,
    /// Destination place
    pub to: &'a str,
    /// Metric used
    pub metric: Metric,
    /// Outcome name, e.g. `found` or `no_path`
    pub status: &'static str,
    /// Rounded-up cost, or the negative sentinel code
    pub code: i64,
}

/// Run the cost command
pub fn run(ctx: &QueryContext, from: &str, to: &str, json: bool) -> Result<()> {
    info!("Costing {} -> {} by {}", from, to, ctx.metric);

    let mut map = ctx.open()?;
    let (status, code) = if from == to {
        ("found", 0)
    } else {
        let outcome = map.outcome(from, to, ctx.metric);
        (outcome.status(), outcome.code())
    };

    if json {
        let report = CostReport {
            from,
            to,
            metric: ctx.metric,
            status,
            code,
        };
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{text}");
    } else {
        println!("{code}");
    }

    if code < 0 {
        info!("No route: {} (code {})", status, code);
    }

    Ok(())
}
