//! A* shortest-path search over a [`Graph`].

use crate::error::{RouteError, RouteResult};
use crate::graph::Graph;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A start→goal path and its total edge weight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Node ids from start to goal, both inclusive.
    pub nodes: Vec<usize>,
    /// Sum of edge weights along `nodes`.
    pub cost: u64,
}

// Open-set entry. Ordered so `BinaryHeap` pops the smallest
// `g + h` first, then the smallest node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    estimated_total: u64,
    cost: u64,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_total
            .cmp(&self.estimated_total)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-search scratch state, indexed by node id.
///
/// Lives for exactly one call to [`find_path`], so repeated searches over
/// the same graph never observe each other's distances or backpointers.
struct SearchArena {
    cost_from_start: Vec<u64>,
    heuristic: Vec<Option<u64>>,
    came_from: Vec<Option<usize>>,
}

impl SearchArena {
    fn new(node_count: usize) -> Self {
        Self {
            cost_from_start: vec![u64::MAX; node_count],
            heuristic: vec![None; node_count],
            came_from: vec![None; node_count],
        }
    }

    fn estimate(&mut self, graph: &Graph, node: usize, goal: usize) -> u64 {
        *self.heuristic[node].get_or_insert_with(|| graph.heuristic(node, goal))
    }

    fn reconstruct(&self, start: usize, goal: usize) -> Vec<usize> {
        let mut nodes = vec![goal];
        let mut current = goal;
        while current != start {
            match self.came_from[current] {
                Some(prev) => {
                    nodes.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        nodes.reverse();
        nodes
    }
}

/// Finds a minimum-cost path from `start` to `goal`.
///
/// The open set is a binary heap keyed by `cost_from_start + heuristic`.
/// There is no closed set: a neighbor is (re)queued whenever the new
/// tentative cost is strictly smaller than the best one seen so far, and
/// stale heap entries are skipped when popped. Ties on the key go to the
/// smaller node id.
///
/// The result is optimal whenever [`Graph::heuristic`] never overestimates
/// the remaining cost.
///
/// # Errors
/// - [`RouteError::UnknownNode`] if either id is outside the graph.
/// - [`RouteError::Unreachable`] if the open set empties before `goal`
///   is reached.
pub fn find_path(graph: &Graph, start: usize, goal: usize) -> RouteResult<Path> {
    graph.node(start)?;
    graph.node(goal)?;

    if start == goal {
        return Ok(Path {
            nodes: vec![start],
            cost: 0,
        });
    }

    let mut arena = SearchArena::new(graph.len());
    let mut open = BinaryHeap::new();
    let mut expanded = 0usize;

    arena.cost_from_start[start] = 0;
    open.push(OpenEntry {
        estimated_total: arena.estimate(graph, start, goal),
        cost: 0,
        node: start,
    });

    while let Some(current) = open.pop() {
        if current.cost > arena.cost_from_start[current.node] {
            continue;
        }
        if current.node == goal {
            let nodes = arena.reconstruct(start, goal);
            debug!(
                "astar {start}->{goal}: cost {}, {} hops, {expanded} expansions",
                current.cost,
                nodes.len() - 1
            );
            return Ok(Path {
                nodes,
                cost: current.cost,
            });
        }
        expanded += 1;

        for (neighbor, weight) in graph.neighbors(current.node) {
            let tentative = current.cost.saturating_add(weight);
            if tentative < arena.cost_from_start[neighbor] {
                arena.cost_from_start[neighbor] = tentative;
                arena.came_from[neighbor] = Some(current.node);
                let h = arena.estimate(graph, neighbor, goal);
                open.push(OpenEntry {
                    estimated_total: tentative.saturating_add(h),
                    cost: tentative,
                    node: neighbor,
                });
            }
        }
    }

    debug!("astar {start}->{goal}: open set exhausted after {expanded} expansions");
    Err(RouteError::Unreachable { start, goal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    /// Plain Dijkstra over the same graph, for cross-checking.
    fn dijkstra(graph: &Graph, start: usize, goal: usize) -> Option<u64> {
        let n = graph.len();
        let mut dist = vec![u64::MAX; n];
        let mut done = vec![false; n];
        dist[start] = 0;
        loop {
            let u = (0..n)
                .filter(|&v| !done[v] && dist[v] != u64::MAX)
                .min_by_key(|&v| dist[v])?;
            if u == goal {
                return Some(dist[u]);
            }
            done[u] = true;
            for (v, w) in graph.neighbors(u) {
                dist[v] = dist[v].min(dist[u] + w);
            }
        }
    }

    fn path_cost(graph: &Graph, nodes: &[usize]) -> u64 {
        nodes
            .windows(2)
            .map(|w| graph.edge_weight(w[0], w[1]).expect("path uses real edges"))
            .sum()
    }

    /// Grid-like graph with weights never below the Euclidean distance.
    fn city_graph() -> Graph {
        Graph::from_parts(
            vec![
                (0, "A", 0.0, 0.0),
                (1, "B", 10.0, 0.0),
                (2, "C", 20.0, 0.0),
                (3, "D", 0.0, 10.0),
                (4, "E", 10.0, 10.0),
                (5, "F", 20.0, 10.0),
            ],
            vec![
                (0, 1, 12),
                (1, 2, 15),
                (0, 3, 10),
                (3, 4, 11),
                (4, 5, 10),
                (5, 2, 10),
                (1, 4, 10),
                (4, 1, 10),
                (2, 5, 13),
                (1, 0, 12),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_start_equals_goal() {
        let g = city_graph();
        let path = find_path(&g, 3, 3).unwrap();
        assert_eq!(path.nodes, vec![3]);
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn test_direct_edge() {
        let g = city_graph();
        let path = find_path(&g, 0, 1).unwrap();
        assert_eq!(path.nodes, vec![0, 1]);
        assert_eq!(path.cost, 12);
    }

    #[test]
    fn test_prefers_cheaper_detour() {
        let g = city_graph();
        // 0->1->2 = 27, 0->3->4->5->2 = 41, 0->1->4->5->2 = 42
        let path = find_path(&g, 0, 2).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2]);
        assert_eq!(path.cost, 27);
    }

    #[test]
    fn test_matches_dijkstra_on_all_pairs() {
        let g = city_graph();
        for s in 0..g.len() {
            for t in 0..g.len() {
                let expected = dijkstra(&g, s, t);
                match find_path(&g, s, t) {
                    Ok(path) => {
                        assert_eq!(Some(path.cost), expected, "pair {s}->{t}");
                        assert_eq!(path.nodes.first(), Some(&s));
                        assert_eq!(path.nodes.last(), Some(&t));
                        assert_eq!(path_cost(&g, &path.nodes), path.cost);
                    }
                    Err(err) => {
                        assert_eq!(expected, None, "pair {s}->{t}");
                        assert_eq!(err, RouteError::Unreachable { start: s, goal: t });
                    }
                }
            }
        }
    }

    #[test]
    fn test_relaxation_replaces_worse_entry() {
        // 0->2 direct is expensive; 0->1->2 is cheaper and discovered later.
        let g = Graph::from_parts(
            vec![
                (0, "A", 0.0, 0.0),
                (1, "B", 1.0, 0.0),
                (2, "C", 2.0, 0.0),
            ],
            vec![(0, 2, 50), (0, 1, 1), (1, 2, 1)],
        )
        .unwrap();
        let path = find_path(&g, 0, 2).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2]);
        assert_eq!(path.cost, 2);
    }

    #[test]
    fn test_disconnected_components() {
        let g = Graph::from_parts(
            vec![
                (0, "A", 0.0, 0.0),
                (1, "B", 1.0, 0.0),
                (2, "C", 5.0, 5.0),
                (3, "D", 6.0, 5.0),
            ],
            vec![(0, 1, 1), (1, 0, 1), (2, 3, 1), (3, 2, 1)],
        )
        .unwrap();
        assert_eq!(
            find_path(&g, 0, 3),
            Err(RouteError::Unreachable { start: 0, goal: 3 })
        );
    }

    #[test]
    fn test_directed_reachability() {
        let g = Graph::from_parts(
            vec![(0, "A", 0.0, 0.0), (1, "B", 1.0, 0.0)],
            vec![Edge::new(0, 1, 3)],
        )
        .unwrap();
        assert!(find_path(&g, 0, 1).is_ok());
        assert!(find_path(&g, 1, 0).is_err());
    }

    #[test]
    fn test_unknown_node() {
        let g = city_graph();
        assert_eq!(
            find_path(&g, 0, 99),
            Err(RouteError::UnknownNode { id: 99, node_count: 6 })
        );
    }

    #[test]
    fn test_repeated_searches_are_independent() {
        let g = city_graph();
        let first = find_path(&g, 3, 2).unwrap();
        let _ = find_path(&g, 2, 0);
        let again = find_path(&g, 3, 2).unwrap();
        assert_eq!(first, again);
    }
}
