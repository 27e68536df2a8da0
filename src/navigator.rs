// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route queries over a loaded road map

use crate::finder::{find_path, search_from, Metric, Outcome};
use crate::graph::RoadGraph;
use crate::loader;
use crate::render::{render, render_tree};
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A road map ready to answer route queries.
///
/// Every query resets and rewrites the per-place search state, so queries
/// take `&mut self` and one map serves one query at a time.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    graph: RoadGraph,
}

impl RouteMap {
    /// Wrap an already built graph
    #[must_use]
    pub fn new(graph: RoadGraph) -> Self {
        Self { graph }
    }

    /// Load a map file
    pub fn load(path: &Path) -> Result<Self> {
        let graph = loader::load_file(path)
            .with_context(|| format!("Failed to load map {}", path.display()))?;
        Ok(Self { graph })
    }

    /// The underlying graph
    #[must_use]
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// The map with the shortest route from `source` to `destination` bold
    pub fn shortest_route(&mut self, source: &str, destination: &str) -> Vec<String> {
        self.route(source, destination, Metric::Distance)
    }

    /// The map with the fastest route from `source` to `destination` bold
    pub fn fastest_route(&mut self, source: &str, destination: &str) -> Vec<String> {
        self.route(source, destination, Metric::Time)
    }

    /// Shortest distance, rounded up, or a negative [`Outcome`] code
    pub fn shortest_distance(&mut self, source: &str, destination: &str) -> i64 {
        self.cost(source, destination, Metric::Distance)
    }

    /// Fastest time, rounded up, or a negative [`Outcome`] code
    pub fn fastest_time(&mut self, source: &str, destination: &str) -> i64 {
        self.cost(source, destination, Metric::Time)
    }

    /// Render the best route under `metric`.
    ///
    /// Falls back to the unmarked map when the endpoints coincide or no
    /// route is found.
    pub fn route(&mut self, source: &str, destination: &str, metric: Metric) -> Vec<String> {
        if source == destination {
            return render(&self.graph, None);
        }
        let outcome = find_path(&mut self.graph, source, destination, metric);
        if let Outcome::Found { .. } = outcome {
            render(&self.graph, outcome.destination())
        } else {
            debug!("No route to mark: {}", outcome.status());
            render(&self.graph, None)
        }
    }

    /// Scalar cost of the best route under `metric`; 0 when the endpoints coincide
    pub fn cost(&mut self, source: &str, destination: &str, metric: Metric) -> i64 {
        if source == destination {
            return 0;
        }
        self.outcome(source, destination, metric).code()
    }

    /// The tagged result of a query
    pub fn outcome(&mut self, source: &str, destination: &str, metric: Metric) -> Outcome {
        find_path(&mut self.graph, source, destination, metric)
    }

    /// The map with every shortest route starting at `source` bold.
    ///
    /// An unknown source yields the unmarked map.
    pub fn reachable_routes(&mut self, source: &str, metric: Metric) -> Vec<String> {
        let Some(start) = self.graph.find_node(source) else {
            debug!("Unknown source {}", source);
            self.graph.reset_search_state();
            return render(&self.graph, None);
        };
        search_from(&mut self.graph, start, metric);
        render_tree(&self.graph)
    }
}

impl From<RoadGraph> for RouteMap {
    fn from(graph: RoadGraph) -> Self {
        Self::new(graph)
    }
}

impl FromStr for RouteMap {
    type Err = crate::error::LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        loader::load_str(s).map(Self::new)
    }
}
