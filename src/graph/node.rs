//! Node and edge records.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// A graph node: fixed identity and position, plus its outgoing edges.
///
/// Identity is the id alone. Two `Node` values with the same id compare
/// equal and hash the same regardless of name, position or adjacency.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: usize,
    name: String,
    x: f64,
    y: f64,
    /// Outgoing edges: neighbor id → weight. Ordered so neighbor
    /// enumeration is deterministic.
    edges: BTreeMap<usize, u64>,
}

impl Node {
    /// Creates a node with no edges.
    pub fn new(id: usize, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
            edges: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `(x, y)` coordinates.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Outgoing edges in ascending neighbor-id order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.edges.iter().map(|(&to, &w)| (to, w))
    }

    /// Weight of the edge to `to`, if one exists.
    pub fn edge_to(&self, to: usize) -> Option<u64> {
        self.edges.get(&to).copied()
    }

    /// Euclidean distance to another node's position.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn insert_edge(&mut self, to: usize, weight: u64) {
        self.edges.insert(to, weight);
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A directed, weighted connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
}

impl Edge {
    pub fn new(from: usize, to: usize, weight: u64) -> Self {
        Self { from, to, weight }
    }
}

impl From<(usize, usize, u64)> for Edge {
    fn from((from, to, weight): (usize, usize, u64)) -> Self {
        Self { from, to, weight }
    }
}
