// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Single-source shortest paths over the road map
//!
//! The finder is a Dijkstra relaxation driven by a binary min-heap. Keys are
//! never decreased in place: an improved place is pushed again and the stale
//! entry is skipped when it surfaces, and a visited set guarantees a
//! finalized place is never expanded twice.

use crate::graph::{Place, Road, RoadGraph};
use fixedbitset::FixedBitSet;
use num_rational::Ratio;
use num_traits::CheckedAdd;
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use tracing::{debug, trace};

/// Cost function used for a query
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Sum of road distances
    #[default]
    Distance,
    /// Sum of `distance / max_speed` plus the delay of every place passed through
    Time,
}

impl Metric {
    /// Cost of leaving `from` along `road`
    #[must_use]
    pub fn road_cost(self, from: &Place, road: &Road) -> f64 {
        match self {
            Self::Distance => f64::from(road.distance),
            Self::Time => {
                f64::from(from.delay) + f64::from(road.distance) / f64::from(road.max_speed)
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => f.write_str("distance"),
            Self::Time => f.write_str("time"),
        }
    }
}

/// Result of a path query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source is not on the map
    SourceNotFound,
    /// The destination is not on the map
    DestinationNotFound,
    /// Neither endpoint is on the map
    SourceAndDestinationNotFound,
    /// Both endpoints exist but no route connects them
    NoPath,
    /// A route exists
    Found {
        /// Walk `predecessor` links from here back to the source
        destination: NodeIndex,
        /// Metric total, rounded up
        total_cost: u64,
    },
}

impl Outcome {
    /// Sentinel code for [`Outcome::SourceNotFound`]
    pub const SOURCE_NOT_FOUND: i64 = -1;
    /// Sentinel code for [`Outcome::DestinationNotFound`]
    pub const DESTINATION_NOT_FOUND: i64 = -2;
    /// Sentinel code for [`Outcome::SourceAndDestinationNotFound`]
    pub const SOURCE_DESTINATION_NOT_FOUND: i64 = -3;
    /// Sentinel code for [`Outcome::NoPath`]
    pub const NO_PATH: i64 = -4;

    /// Scalar form: the total cost, or a negative sentinel
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::SourceNotFound => Self::SOURCE_NOT_FOUND,
            Self::DestinationNotFound => Self::DESTINATION_NOT_FOUND,
            Self::SourceAndDestinationNotFound => Self::SOURCE_DESTINATION_NOT_FOUND,
            Self::NoPath => Self::NO_PATH,
            Self::Found { total_cost, .. } => i64::try_from(*total_cost).unwrap_or(i64::MAX),
        }
    }

    /// Destination of a found route
    #[must_use]
    pub fn destination(&self) -> Option<NodeIndex> {
        match self {
            Self::Found { destination, .. } => Some(*destination),
            _ => None,
        }
    }

    /// Short machine-readable name
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::SourceNotFound => "source_not_found",
            Self::DestinationNotFound => "destination_not_found",
            Self::SourceAndDestinationNotFound => "source_and_destination_not_found",
            Self::NoPath => "no_path",
            Self::Found { .. } => "found",
        }
    }
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap)
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the cheapest route from `source` to `destination` under `metric`.
///
/// Search state is reset first, so the graph can be queried repeatedly.
/// After a [`Outcome::Found`] the search state holds the complete
/// shortest-path tree rooted at `source`.
pub fn find_path(
    graph: &mut RoadGraph,
    source: &str,
    destination: &str,
    metric: Metric,
) -> Outcome {
    graph.reset_search_state();

    let (start, end) = match (graph.find_node(source), graph.find_node(destination)) {
        (None, None) => return Outcome::SourceAndDestinationNotFound,
        (None, Some(_)) => return Outcome::SourceNotFound,
        (Some(_), None) => return Outcome::DestinationNotFound,
        (Some(start), Some(end)) => (start, end),
    };

    if start == end {
        graph.search_mut(start).best_cost = 0.0;
        return Outcome::Found {
            destination: end,
            total_cost: 0,
        };
    }

    debug!("Searching {} -> {} by {}", source, destination, metric);
    search_from(graph, start, metric);

    let reached = graph.place(end).search;
    if reached.predecessor.is_none() {
        debug!("No path from {} to {}", source, destination);
        return Outcome::NoPath;
    }

    let total_cost = match metric {
        Metric::Distance => round_up(reached.best_cost),
        Metric::Time => exact_time(graph, end).unwrap_or_else(|| {
            round_up(reached.best_cost - f64::from(graph.place(start).delay))
        }),
    };

    debug!("Found {} -> {} with {} {}", source, destination, metric, total_cost);
    Outcome::Found {
        destination: end,
        total_cost,
    }
}

// Costs are sums of non-negative terms, so the cast cannot wrap
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_up(cost: f64) -> u64 {
    cost.max(0.0).ceil() as u64
}

/// Travel time of the route ending at `end`, summed as a fraction and rounded up.
///
/// Walks the roads recorded by the last search. The source's delay is never
/// added, every other place left along the way adds its own. `None` if the
/// sum overflows.
fn exact_time(graph: &RoadGraph, end: NodeIndex) -> Option<u64> {
    let mut total = Ratio::<u128>::from_integer(0);
    let mut current = end;
    loop {
        let search = graph.place(current).search;
        let (Some(pred), Some(via)) = (search.predecessor, search.via) else {
            break;
        };
        let road = graph.road(via);
        let leg = Ratio::new(u128::from(road.distance), u128::from(road.max_speed));
        total = total.checked_add(&leg)?;
        let from = graph.place(pred);
        if from.search.predecessor.is_some() {
            total = total.checked_add(&Ratio::from_integer(u128::from(from.delay)))?;
        }
        current = pred;
    }
    u64::try_from(total.ceil().to_integer()).ok()
}

/// Relax the whole map from `source`, leaving a shortest-path tree behind.
///
/// Resets search state first. Unreachable places keep an infinite cost and
/// no predecessor.
pub fn search_from(graph: &mut RoadGraph, source: NodeIndex, metric: Metric) {
    graph.reset_search_state();
    graph.search_mut(source).best_cost = 0.0;

    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::new();
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if visited.contains(node.index()) {
            continue;
        }
        // Skip if we've found a better path
        if cost > graph.place(node).search.best_cost {
            continue;
        }
        visited.insert(node.index());

        let updates: Vec<(NodeIndex, EdgeIndex, f64)> = {
            let from = graph.place(node);
            graph
                .roads_from(node)
                .into_iter()
                .filter(|r| !visited.contains(r.to.index()))
                .map(|r| (r.to, r.id, cost + metric.road_cost(from, r.road)))
                .collect()
        };

        for (next, via, next_cost) in updates {
            let state = graph.search_mut(next);
            if next_cost < state.best_cost {
                trace!(
                    "Relaxed {:?} -> {:?}: {} -> {}",
                    node,
                    next,
                    state.best_cost,
                    next_cost
                );
                state.best_cost = next_cost;
                state.predecessor = Some(node);
                state.via = Some(via);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A(0) -10,50-> B(0) -20,100-> C(0), plus A -50,100-> C, and isolated D
    fn sample() -> RoadGraph {
        let mut graph = RoadGraph::new();
        for name in ["A", "B", "C", "D"] {
            graph.add_place(name, 0).unwrap();
        }
        graph.add_road("A", "B", 10, 50).unwrap();
        graph.add_road("B", "C", 20, 100).unwrap();
        graph.add_road("A", "C", 50, 100).unwrap();
        graph
    }

    fn name(graph: &RoadGraph, idx: Option<NodeIndex>) -> Option<&str> {
        idx.map(|i| graph.place(i).name.as_str())
    }

    #[test]
    fn test_shortest_distance_goes_via_b() {
        let mut graph = sample();

        let outcome = find_path(&mut graph, "A", "C", Metric::Distance);

        let c = graph.find_node("C").unwrap();
        assert_eq!(
            outcome,
            Outcome::Found {
                destination: c,
                total_cost: 30
            }
        );
        let b = graph.place(c).search.predecessor;
        assert_eq!(name(&graph, b), Some("B"));
        assert_eq!(name(&graph, graph.place(b.unwrap()).search.predecessor), Some("A"));
    }

    #[test]
    fn test_fastest_time_rounds_up() {
        let mut graph = sample();

        let outcome = find_path(&mut graph, "A", "C", Metric::Time);

        assert_eq!(outcome.code(), 1);
    }

    #[test]
    fn test_time_counts_intermediate_delay_only() {
        let mut graph = RoadGraph::new();
        graph.add_place("S", 7).unwrap();
        graph.add_place("M", 3).unwrap();
        graph.add_place("T", 100).unwrap();
        graph.add_road("S", "M", 60, 60).unwrap();
        graph.add_road("M", "T", 30, 60).unwrap();

        // 1 + 3 + 0.5, source and destination delays excluded
        assert_eq!(find_path(&mut graph, "S", "T", Metric::Time).code(), 5);
        assert_eq!(find_path(&mut graph, "S", "T", Metric::Distance).code(), 90);
    }

    #[test]
    fn test_delay_can_change_the_winner() {
        let mut graph = RoadGraph::new();
        graph.add_place("S", 0).unwrap();
        graph.add_place("Slow", 10).unwrap();
        graph.add_place("T", 0).unwrap();
        graph.add_road("S", "Slow", 10, 10).unwrap();
        graph.add_road("Slow", "T", 10, 10).unwrap();
        graph.add_road("S", "T", 50, 10).unwrap();

        assert_eq!(find_path(&mut graph, "S", "T", Metric::Distance).code(), 20);
        assert_eq!(find_path(&mut graph, "S", "T", Metric::Time).code(), 5);
        let t = graph.find_node("T").unwrap();
        assert_eq!(name(&graph, graph.place(t).search.predecessor), Some("S"));
    }

    #[test]
    fn test_isolated_place_has_no_path() {
        let mut graph = sample();

        assert_eq!(find_path(&mut graph, "A", "D", Metric::Distance), Outcome::NoPath);
        assert_eq!(find_path(&mut graph, "A", "D", Metric::Time).code(), -4);
    }

    #[test]
    fn test_roads_are_directed() {
        let mut graph = sample();

        assert_eq!(find_path(&mut graph, "C", "A", Metric::Distance), Outcome::NoPath);
    }

    #[test]
    fn test_missing_endpoints() {
        let mut graph = sample();

        assert_eq!(find_path(&mut graph, "Z", "A", Metric::Distance), Outcome::SourceNotFound);
        assert_eq!(find_path(&mut graph, "A", "Z", Metric::Distance), Outcome::DestinationNotFound);
        assert_eq!(
            find_path(&mut graph, "Y", "Z", Metric::Time),
            Outcome::SourceAndDestinationNotFound
        );
        assert_eq!(Outcome::SourceNotFound.code(), -1);
        assert_eq!(Outcome::DestinationNotFound.code(), -2);
        assert_eq!(Outcome::SourceAndDestinationNotFound.code(), -3);
    }

    #[test]
    fn test_same_endpoint_is_trivial() {
        let mut graph = sample();
        let a = graph.find_node("A").unwrap();

        assert_eq!(
            find_path(&mut graph, "A", "A", Metric::Time),
            Outcome::Found {
                destination: a,
                total_cost: 0
            }
        );
    }

    #[test]
    fn test_search_runs_past_destination() {
        let mut graph = sample();

        find_path(&mut graph, "A", "B", Metric::Distance);

        // C lies beyond B and is still settled
        let c = graph.find_node("C").unwrap();
        assert!((graph.place(c).search.best_cost - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stale_state_does_not_leak() {
        let mut graph = sample();

        find_path(&mut graph, "A", "C", Metric::Distance);
        let outcome = find_path(&mut graph, "B", "C", Metric::Distance);

        assert_eq!(outcome.code(), 20);
        let a = graph.find_node("A").unwrap();
        assert!(!graph.place(a).search.is_reached());
        assert!(graph.place(a).search.predecessor.is_none());
    }

    #[test]
    fn test_parallel_roads_pick_cheapest() {
        let mut graph = RoadGraph::new();
        graph.add_place("A", 0).unwrap();
        graph.add_place("B", 0).unwrap();
        graph.add_road("A", "B", 40, 10).unwrap();
        graph.add_road("A", "B", 25, 5).unwrap();

        assert_eq!(find_path(&mut graph, "A", "B", Metric::Distance).code(), 25);
        assert_eq!(find_path(&mut graph, "A", "B", Metric::Time).code(), 4);
    }

    #[test]
    fn test_whole_time_is_not_rounded_past() {
        // 9/28 + 18/28 + 1/28 is exactly 1 but not in floating point
        let mut graph = RoadGraph::new();
        for name in ["A", "B", "C", "D"] {
            graph.add_place(name, 0).unwrap();
        }
        graph.add_road("A", "B", 9, 28).unwrap();
        graph.add_road("B", "C", 18, 28).unwrap();
        graph.add_road("C", "D", 1, 28).unwrap();

        assert_eq!(find_path(&mut graph, "A", "D", Metric::Time).code(), 1);

        let mut reversed = RoadGraph::new();
        for name in ["A", "B", "C", "D"] {
            reversed.add_place(name, 0).unwrap();
        }
        reversed.add_road("A", "B", 18, 28).unwrap();
        reversed.add_road("B", "C", 9, 28).unwrap();
        reversed.add_road("C", "D", 1, 28).unwrap();

        assert_eq!(find_path(&mut reversed, "A", "D", Metric::Time).code(), 1);
    }

    #[test]
    fn test_exact_time_includes_intermediate_delays() {
        let mut graph = RoadGraph::new();
        graph.add_place("S", 4).unwrap();
        graph.add_place("M", 2).unwrap();
        graph.add_place("T", 9).unwrap();
        graph.add_road("S", "M", 1, 3).unwrap();
        graph.add_road("M", "T", 2, 3).unwrap();

        // 1/3 + 2 + 2/3
        assert_eq!(find_path(&mut graph, "S", "T", Metric::Time).code(), 3);
    }

    #[test]
    fn test_relaxation_never_raises_cost() {
        let mut graph = RoadGraph::new();
        for name in ["A", "B", "C"] {
            graph.add_place(name, 0).unwrap();
        }
        // C is first reached cheaply from A, then offered a worse route via B
        graph.add_road("A", "C", 5, 1).unwrap();
        graph.add_road("A", "B", 1, 1).unwrap();
        graph.add_road("B", "C", 50, 1).unwrap();

        find_path(&mut graph, "A", "C", Metric::Distance);

        let a = graph.find_node("A").unwrap();
        let c = graph.find_node("C").unwrap();
        let state = graph.place(c).search;
        assert!((state.best_cost - 5.0).abs() < f64::EPSILON);
        assert_eq!(state.predecessor, Some(a));
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::Distance.to_string(), "distance");
        assert_eq!(Metric::Time.to_string(), "time");
        assert_eq!(Metric::default(), Metric::Distance);
    }
}
