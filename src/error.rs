// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for building and loading road maps

use thiserror::Error;

/// Errors raised while assembling a [`RoadGraph`](crate::graph::RoadGraph)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A place with this name already exists
    #[error("duplicate place: {0}")]
    DuplicatePlace(String),
    /// A road references a place that has not been added
    #[error("unknown place: {0}")]
    UnknownPlace(String),
    /// Roads need a positive distance and a positive speed limit
    #[error("invalid road {from} -> {to}: distance and max speed must be positive (got {distance},{max_speed})")]
    InvalidRoad {
        /// Source place name
        from: String,
        /// Target place name
        to: String,
        /// Road length
        distance: u32,
        /// Speed limit
        max_speed: u32,
    },
}

/// Errors raised while reading a map description
#[derive(Error, Debug)]
pub enum LoadError {
    /// The map file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A line is neither a node, an edge nor framing
    #[error("line {line}: malformed directive `{content}`")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Offending line, trimmed
        content: String,
    },
    /// A well-formed line could not be added to the graph
    #[error("line {line}: {source}")]
    Graph {
        /// 1-based line number
        line: usize,
        /// Underlying graph error
        #[source]
        source: GraphError,
    },
}
