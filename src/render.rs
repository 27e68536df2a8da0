// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Re-serialise the road map with search results marked bold

use crate::graph::{Place, RoadGraph, RoadRef};
use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

const OPENING: &str = "Digraph {";
const CLOSING: &str = "}";
const BOLD: &str = "[style=bold]";

/// Render the map, marking the route that ends at `destination`.
///
/// With `None` every place and road is written unmarked. With a
/// destination, the predecessor chain from the last search is walked back
/// to the source; places on it are bold, and so is every road the search
/// actually used to reach a place on it. A parallel road between the same
/// two places stays plain.
#[must_use]
pub fn render(graph: &RoadGraph, destination: Option<NodeIndex>) -> Vec<String> {
    let Some(destination) = destination else {
        return write_map(graph, |_| false, |_| false);
    };

    let mut on_path = FixedBitSet::with_capacity(graph.node_count());
    let mut current = Some(destination);
    while let Some(idx) = current {
        if on_path.put(idx.index()) {
            break;
        }
        current = graph.place(idx).search.predecessor;
    }

    write_map(
        graph,
        |idx| on_path.contains(idx.index()),
        |road| {
            on_path.contains(road.from.index())
                && on_path.contains(road.to.index())
                && is_tree_edge(graph, road)
        },
    )
}

/// Render the map with the whole shortest-path tree of the last search bold
#[must_use]
pub fn render_tree(graph: &RoadGraph) -> Vec<String> {
    write_map(
        graph,
        |idx| graph.place(idx).search.is_reached(),
        |road| is_tree_edge(graph, road),
    )
}

fn is_tree_edge(graph: &RoadGraph, road: &RoadRef<'_>) -> bool {
    let search = graph.place(road.to).search;
    search.predecessor == Some(road.from) && search.via == Some(road.id)
}

fn write_map(
    graph: &RoadGraph,
    bold_place: impl Fn(NodeIndex) -> bool,
    bold_road: impl Fn(&RoadRef<'_>) -> bool,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(graph.node_count() + graph.edge_count() + 2);
    lines.push(OPENING.to_string());

    for road in graph.roads() {
        lines.push(road_line(graph, &road, bold_road(&road)));
    }
    for (idx, place) in graph.places() {
        lines.push(place_line(place, bold_place(idx)));
    }

    lines.push(CLOSING.to_string());
    lines
}

fn road_line(graph: &RoadGraph, road: &RoadRef<'_>, bold: bool) -> String {
    format!(
        "{} -> {} [label=\"{},{}\"]{};",
        graph.place(road.from).name,
        graph.place(road.to).name,
        road.road.distance,
        road.road.max_speed,
        if bold { BOLD } else { "" }
    )
}

fn place_line(place: &Place, bold: bool) -> String {
    format!(
        "{} [label=\"{},{}\"]{};",
        place.name,
        place.name,
        place.delay,
        if bold { BOLD } else { "" }
    )
}
