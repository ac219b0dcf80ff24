//! Text loaders for node and edge lists.
//!
//! Pure functions over already-read text; the caller owns file access.
//!
//! # Node list
//!
//! A header line, then one 4-line record per node:
//!
//! ```text
//! name
//! id
//! x
//! y
//! ```
//!
//! # Edge list
//!
//! A header line, then whitespace-separated `from to weight` triples.
//! Line breaks between the three numbers are allowed.

use crate::error::{RouteError, RouteResult};
use crate::graph::{Edge, Graph, Node};
use std::str::FromStr;

/// Parses a node list. Ids must be dense and in order.
pub fn parse_nodes(text: &str) -> RouteResult<Vec<Node>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .skip(1)
        .filter(|(_, line)| !line.is_empty());

    let last_line = text.lines().count();
    let mut nodes = Vec::new();
    while let Some((_, name)) = lines.next() {
        let id: usize = parse_field(lines.next(), "id", last_line)?;
        let x: f64 = parse_field(lines.next(), "x", last_line)?;
        let y: f64 = parse_field(lines.next(), "y", last_line)?;
        if id != nodes.len() {
            return Err(RouteError::NonDenseNodeId {
                position: nodes.len(),
                id,
            });
        }
        nodes.push(Node::new(id, name, x, y));
    }
    Ok(nodes)
}

/// Parses an edge list.
pub fn parse_edges(text: &str) -> RouteResult<Vec<Edge>> {
    let mut tokens = text
        .lines()
        .enumerate()
        .skip(1)
        .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));

    let mut edges = Vec::new();
    while let Some(first) = tokens.next() {
        let from: usize = parse_token(first, "from")?;
        let to: usize = parse_token(next_token(&mut tokens, first.0, "to")?, "to")?;
        let weight: u64 = parse_token(next_token(&mut tokens, first.0, "weight")?, "weight")?;
        edges.push(Edge::new(from, to, weight));
    }
    Ok(edges)
}

/// Parses both lists and builds the graph.
pub fn load_graph(nodes_text: &str, edges_text: &str) -> RouteResult<Graph> {
    let mut graph = Graph::new(parse_nodes(nodes_text)?)?;
    for edge in parse_edges(edges_text)? {
        graph.add_edge(edge.from, edge.to, edge.weight)?;
    }
    Ok(graph)
}

fn parse_field<T: FromStr>(
    line: Option<(usize, &str)>,
    field: &str,
    last_line: usize,
) -> RouteResult<T> {
    let line = line.ok_or_else(|| {
        RouteError::parse(last_line, format!("node record ends before {field}"))
    })?;
    parse_token(line, field)
}

fn parse_token<T: FromStr>((line, token): (usize, &str), field: &str) -> RouteResult<T> {
    token
        .parse()
        .map_err(|_| RouteError::parse(line, format!("invalid {field} '{token}'")))
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
    line: usize,
    field: &str,
) -> RouteResult<(usize, &'a str)> {
    tokens
        .next()
        .ok_or_else(|| RouteError::parse(line, format!("edge is missing {field}")))
}
