//! Directed graph over dense node ids.

use super::node::{Edge, Node};
use crate::error::{RouteError, RouteResult};

/// A sparse directed graph whose node ids are exactly `0..len()`.
///
/// Edges are directed: `add_edge(i, j, w)` says nothing about `j → i`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GraphRepr"))]
pub struct Graph {
    nodes: Vec<Node>,
}

/// Unchecked wire form; deserialization goes through [`Graph::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GraphRepr {
    nodes: Vec<Node>,
}

#[cfg(feature = "serde")]
impl TryFrom<GraphRepr> for Graph {
    type Error = RouteError;

    fn try_from(repr: GraphRepr) -> RouteResult<Self> {
        Self::new(repr.nodes)
    }
}

impl Graph {
    /// Builds a graph from nodes whose ids are dense and in order.
    ///
    /// Any edges already stored on the nodes must point at ids inside
    /// the graph.
    pub fn new(nodes: Vec<Node>) -> RouteResult<Self> {
        for (position, node) in nodes.iter().enumerate() {
            if node.id() != position {
                return Err(RouteError::NonDenseNodeId {
                    position,
                    id: node.id(),
                });
            }
        }
        let node_count = nodes.len();
        for node in &nodes {
            if let Some((to, _)) = node.edges().find(|&(to, _)| to >= node_count) {
                return Err(RouteError::UnknownNode { id: to, node_count });
            }
        }
        Ok(Self { nodes })
    }

    /// Builds a graph from `(id, name, x, y)` records and a sparse edge list.
    pub fn from_parts<N, S, E>(nodes: N, edges: E) -> RouteResult<Self>
    where
        N: IntoIterator<Item = (usize, S, f64, f64)>,
        S: Into<String>,
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        let nodes = nodes
            .into_iter()
            .map(|(id, name, x, y)| Node::new(id, name, x, y))
            .collect();
        let mut graph = Self::new(nodes)?;
        for edge in edges {
            let edge = edge.into();
            graph.add_edge(edge.from, edge.to, edge.weight)?;
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: usize) -> RouteResult<&Node> {
        self.nodes.get(id).ok_or(RouteError::UnknownNode {
            id,
            node_count: self.nodes.len(),
        })
    }

    /// Inserts or overwrites the directed edge `from → to`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: u64) -> RouteResult<()> {
        self.node(to)?;
        let node_count = self.nodes.len();
        let node = self.nodes.get_mut(from).ok_or(RouteError::UnknownNode {
            id: from,
            node_count,
        })?;
        node.insert_edge(to, weight);
        Ok(())
    }

    /// Weight of the direct edge `from → to`, if present.
    pub fn edge_weight(&self, from: usize, to: usize) -> Option<u64> {
        self.nodes.get(from).and_then(|n| n.edge_to(to))
    }

    /// Outgoing `(neighbor, weight)` pairs of `id`, in ascending neighbor order.
    ///
    /// Yields nothing for an id outside the graph.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.nodes.get(id).into_iter().flat_map(|n| n.edges())
    }

    /// All directed edges, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes
            .iter()
            .flat_map(|n| n.edges().map(move |(to, w)| Edge::new(n.id(), to, w)))
    }

    /// Straight-line estimate of the cost from `node` to `goal`.
    ///
    /// The Euclidean distance floored to whole cost units. It is an
    /// admissible A* estimate only while every edge weight is at least the
    /// straight-line distance between its endpoints; nothing checks that.
    /// Unknown ids estimate 0.
    pub fn heuristic(&self, node: usize, goal: usize) -> u64 {
        match (self.nodes.get(node), self.nodes.get(goal)) {
            (Some(a), Some(b)) => a.distance_to(b).floor() as u64,
            _ => 0,
        }
    }
}
