// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Road map graph with petgraph backing and per-query search state

use crate::error::GraphError;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Mutable bookkeeping written by the path finder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    /// Best known cost from the current source
    pub best_cost: f64,
    /// Place that currently yields `best_cost`
    pub predecessor: Option<NodeIndex>,
    /// Road from `predecessor` that yields `best_cost`
    pub via: Option<EdgeIndex>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            best_cost: f64::INFINITY,
            predecessor: None,
            via: None,
        }
    }
}

impl SearchState {
    /// Whether the last search reached this place
    #[must_use]
    pub fn is_reached(&self) -> bool {
        self.best_cost.is_finite()
    }
}

/// A named point on the map
#[derive(Debug, Clone)]
pub struct Place {
    /// Unique, case-sensitive name
    pub name: String,
    /// Time spent at this place, used only by the time metric
    pub delay: u32,
    /// Search state of the last query
    pub search: SearchState,
}

/// A directed road between two places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Road {
    /// Length of the road
    pub distance: u32,
    /// Speed limit on the road
    pub max_speed: u32,
}

/// Borrowed view of one road with its endpoints
#[derive(Debug, Clone, Copy)]
pub struct RoadRef<'a> {
    /// Edge index in the graph
    pub id: EdgeIndex,
    /// Place the road leaves from
    pub from: NodeIndex,
    /// Place the road arrives at
    pub to: NodeIndex,
    /// Road attributes
    pub road: &'a Road,
}

/// The road map
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    /// The underlying directed graph
    graph: DiGraph<Place, Road>,
    /// Map from place name to node index
    node_indices: HashMap<String, NodeIndex>,
}

impl RoadGraph {
    /// Create a new empty road map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place to the map
    pub fn add_place(&mut self, name: &str, delay: u32) -> Result<NodeIndex, GraphError> {
        if self.node_indices.contains_key(name) {
            return Err(GraphError::DuplicatePlace(name.to_string()));
        }
        let idx = self.graph.add_node(Place {
            name: name.to_string(),
            delay,
            search: SearchState::default(),
        });
        self.node_indices.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Add a road between two existing places
    pub fn add_road(
        &mut self,
        from: &str,
        to: &str,
        distance: u32,
        max_speed: u32,
    ) -> Result<EdgeIndex, GraphError> {
        let from_idx = self
            .find_node(from)
            .ok_or_else(|| GraphError::UnknownPlace(from.to_string()))?;
        let to_idx = self
            .find_node(to)
            .ok_or_else(|| GraphError::UnknownPlace(to.to_string()))?;

        if distance == 0 || max_speed == 0 {
            return Err(GraphError::InvalidRoad {
                from: from.to_string(),
                to: to.to_string(),
                distance,
                max_speed,
            });
        }

        Ok(self.graph.add_edge(from_idx, to_idx, Road { distance, max_speed }))
    }

    /// Forget the results of the previous search. Idempotent.
    pub fn reset_search_state(&mut self) {
        for place in self.graph.node_weights_mut() {
            place.search = SearchState::default();
        }
    }

    /// Look up a place by exact name
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_indices.get(name).copied()
    }

    /// Get a place by index
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph.
    #[must_use]
    pub fn place(&self, idx: NodeIndex) -> &Place {
        &self.graph[idx]
    }

    /// Get a road by index
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[must_use]
    pub fn road(&self, id: EdgeIndex) -> &Road {
        &self.graph[id]
    }

    pub(crate) fn search_mut(&mut self, idx: NodeIndex) -> &mut SearchState {
        &mut self.graph[idx].search
    }

    /// All places in the order they were added
    pub fn places(&self) -> impl Iterator<Item = (NodeIndex, &Place)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Outgoing roads of a place in the order they were added
    #[must_use]
    pub fn roads_from(&self, idx: NodeIndex) -> Vec<RoadRef<'_>> {
        // petgraph walks the adjacency list newest first
        let mut roads: Vec<RoadRef<'_>> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| RoadRef {
                id: e.id(),
                from: e.source(),
                to: e.target(),
                road: e.weight(),
            })
            .collect();
        roads.reverse();
        roads
    }

    /// Every road, grouped by source place
    #[must_use]
    pub fn roads(&self) -> Vec<RoadRef<'_>> {
        self.graph
            .node_indices()
            .flat_map(|idx| self.roads_from(idx))
            .collect()
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
