// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Routemap library - shortest and fastest routes over small road maps
//!
//! A map is a directed graph of named places (each with a stop-over delay)
//! joined by roads (each with a distance and a speed limit), written as a
//! DOT-like digraph. Queries find the shortest route by distance or the
//! fastest route by travel time and re-render the map with the winning
//! route marked `[style=bold]`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod finder;
pub mod graph;
pub mod loader;
pub mod navigator;
pub mod render;

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{GraphError, LoadError};
    pub use crate::finder::{find_path, search_from, Metric, Outcome};
    pub use crate::graph::{Place, Road, RoadGraph, SearchState};
    pub use crate::navigator::RouteMap;
    pub use anyhow::{Context, Result};
}
