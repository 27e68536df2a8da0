// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Parser for the DOT-like map description
//!
//! ```text
//! Digraph {
//! A -> B [label="10,50"];
//! A [label="A,0"];
//! B [label="B,5"];
//! }
//! ```
//!
//! Node and edge lines may come in any order; every node is added before
//! the first edge.

use crate::error::LoadError;
use crate::graph::RoadGraph;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One meaningful line of a map description
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive<'a> {
    Node { name: &'a str, delay: u32 },
    Edge { from: &'a str, to: &'a str, distance: u32, max_speed: u32 },
}

/// Read and parse a map file
pub fn load_file(path: &Path) -> Result<RoadGraph, LoadError> {
    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    load_str(&content)
}

/// Parse a map description
pub fn load_str(text: &str) -> Result<RoadGraph, LoadError> {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        match parse_line(raw) {
            Ok(None) => {}
            Ok(Some(d @ Directive::Node { .. })) => nodes.push((line, d)),
            Ok(Some(d @ Directive::Edge { .. })) => edges.push((line, d)),
            Err(()) => {
                return Err(LoadError::Malformed {
                    line,
                    content: raw.trim().to_string(),
                })
            }
        }
    }

    let mut graph = RoadGraph::new();
    for (line, directive) in nodes.into_iter().chain(edges) {
        let added = match directive {
            Directive::Node { name, delay } => graph.add_place(name, delay).map(drop),
            Directive::Edge { from, to, distance, max_speed } => {
                graph.add_road(from, to, distance, max_speed).map(drop)
            }
        };
        added.map_err(|source| LoadError::Graph { line, source })?;
    }

    debug!(
        "Loaded map with {} places and {} roads",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// `Ok(None)` for framing and blank lines
fn parse_line(raw: &str) -> Result<Option<Directive<'_>>, ()> {
    let line = raw.trim();
    if line.is_empty() || line == "}" || is_opening(line) {
        return Ok(None);
    }

    let (head, attrs) = line.split_once('[').ok_or(())?;
    let (first, second) = parse_label(attrs)?;

    match head.split_once("->") {
        Some((from, to)) => {
            let from = parse_name(from)?;
            let to = parse_name(to)?;
            Ok(Some(Directive::Edge {
                from,
                to,
                distance: parse_number(first)?,
                max_speed: parse_number(second)?,
            }))
        }
        None => {
            let name = parse_name(head)?;
            // The label repeats the name and must agree with it
            if first != name {
                return Err(());
            }
            Ok(Some(Directive::Node {
                name,
                delay: parse_number(second)?,
            }))
        }
    }
}

fn is_opening(line: &str) -> bool {
    line.strip_suffix('{')
        .map(str::trim)
        .is_some_and(|kw| kw.eq_ignore_ascii_case("digraph"))
}

/// A bare token with no whitespace or quoting
fn parse_name(token: &str) -> Result<&str, ()> {
    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) || token.contains('"') {
        return Err(());
    }
    Ok(token)
}

/// Split `label="x,y"];` (with optional trailing `[style=bold]`) into `x` and `y`
fn parse_label(attrs: &str) -> Result<(&str, &str), ()> {
    let rest = attrs.trim_start().strip_prefix("label").ok_or(())?;
    let rest = rest.trim_start().strip_prefix('=').ok_or(())?;
    let rest = rest.trim_start().strip_prefix('"').ok_or(())?;
    let (label, tail) = rest.split_once('"').ok_or(())?;
    let tail = tail.trim_start().strip_prefix(']').ok_or(())?;
    let tail = tail.trim();
    let tail = tail.strip_suffix(';').unwrap_or(tail).trim_end();
    if !(tail.is_empty() || is_style(tail)) {
        return Err(());
    }
    let (first, second) = label.split_once(',').ok_or(())?;
    Ok((first.trim(), second.trim()))
}

fn is_style(tail: &str) -> bool {
    tail.strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .and_then(|t| t.trim().strip_prefix("style"))
        .and_then(|t| t.trim_start().strip_prefix('='))
        .is_some_and(|style| !style.trim().is_empty())
}

fn parse_number(token: &str) -> Result<u32, ()> {
    token.parse().map_err(drop)
}
