//! Distance-matrix completion.
//!
//! Seeds a [`DistanceMatrix`] from the graph's direct edges and resolves
//! every remaining pair with [`find_path`]. Each resolved cost is written
//! back to the graph as a shortcut edge so later searches can reuse it.

use super::astar::find_path;
use crate::error::{RouteError, RouteResult};
use crate::graph::{DistanceMatrix, Graph};
use log::info;

/// Node sequences realizing each matrix entry.
///
/// `get(i, i)` is `[i]`, a direct edge is `[i, j]`, and a resolved pair is
/// the full A* path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PathTableRepr"))]
pub struct PathTable {
    size: usize,
    paths: Vec<Vec<usize>>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PathTableRepr {
    size: usize,
    paths: Vec<Vec<usize>>,
}

/// Every entry must run from its row node to its column node through
/// nodes of the table.
#[cfg(feature = "serde")]
impl TryFrom<PathTableRepr> for PathTable {
    type Error = RouteError;

    fn try_from(repr: PathTableRepr) -> RouteResult<Self> {
        let n = repr.size;
        let expected = n.checked_mul(n).unwrap_or(usize::MAX);
        if repr.paths.len() != expected {
            return Err(RouteError::DimensionMismatch {
                expected,
                actual: repr.paths.len(),
            });
        }
        for (at, path) in repr.paths.iter().enumerate() {
            let (from, to) = (at / n, at % n);
            if let Some(&id) = path.iter().find(|&&id| id >= n) {
                return Err(RouteError::UnknownNode { id, node_count: n });
            }
            if path.first() != Some(&from) || path.last() != Some(&to) {
                return Err(RouteError::IncompleteMatrix { from, to });
            }
        }
        Ok(Self {
            size: n,
            paths: repr.paths,
        })
    }
}

impl PathTable {
    /// The node path from `from` to `to`, both inclusive.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> &[usize] {
        &self.paths[from * self.size + to]
    }

    /// Expands a visiting order into the full closed route.
    ///
    /// Consecutive tour stops (including the closing leg back to the first
    /// stop) are replaced by their stored paths. The route starts and ends
    /// at `tour[0]`; an empty tour yields an empty route.
    pub fn expand_tour(&self, tour: &[usize]) -> RouteResult<Vec<usize>> {
        let Some(&first) = tour.first() else {
            return Ok(Vec::new());
        };
        if let Some(&id) = tour.iter().find(|&&id| id >= self.size) {
            return Err(RouteError::UnknownNode {
                id,
                node_count: self.size,
            });
        }

        let mut route = vec![first];
        let legs = tour.iter().zip(tour.iter().skip(1).chain(std::iter::once(&first)));
        for (&from, &to) in legs {
            route.extend_from_slice(&self.get(from, to)[1..]);
        }
        Ok(route)
    }
}

/// A fully populated distance matrix plus the paths behind it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub matrix: DistanceMatrix,
    pub paths: PathTable,
    /// Number of entries that needed an A* search.
    pub resolved: usize,
}

/// Completes the all-pairs matrix for `graph`.
///
/// Pairs are visited row-major. For every pair without a direct edge the
/// A* cost is stored at `M[i][j]` and added to the graph as edge `i → j`.
/// Direct edges keep their own weight even when a detour is cheaper.
///
/// # Errors
/// Returns [`RouteError::Unreachable`] for the first pair with no path.
/// No partial matrix is returned.
pub fn complete_matrix(graph: &mut Graph) -> RouteResult<Completion> {
    let n = graph.len();
    let mut matrix = DistanceMatrix::from_graph(graph);
    let mut paths = Vec::with_capacity(n * n);
    let mut resolved = 0usize;

    for i in 0..n {
        for j in 0..n {
            if i == j {
                paths.push(vec![i]);
            } else if matrix.is_known(i, j) {
                paths.push(vec![i, j]);
            } else {
                let path = find_path(graph, i, j)?;
                matrix.set(i, j, path.cost)?;
                graph.add_edge(i, j, path.cost)?;
                let nodes = splice_shortcuts(&paths, n, &path.nodes);
                paths.push(nodes);
                resolved += 1;
            }
        }
    }

    info!("distance matrix completed: {n} nodes, {resolved} entries resolved by A*");

    Ok(Completion {
        matrix,
        paths: PathTable { size: n, paths },
        resolved,
    })
}

/// Replaces hops over earlier shortcut edges with the paths behind them.
///
/// A shortcut `u → v` only exists once pair `(u, v)` has been resolved,
/// and pairs are resolved row-major, so its path is already in `done`.
fn splice_shortcuts(done: &[Vec<usize>], n: usize, nodes: &[usize]) -> Vec<usize> {
    let mut spliced = Vec::with_capacity(nodes.len());
    spliced.extend(nodes.first());
    for hop in nodes.windows(2) {
        match done.get(hop[0] * n + hop[1]) {
            Some(path) => spliced.extend_from_slice(&path[1..]),
            None => spliced.push(hop[1]),
        }
    }
    spliced
}
