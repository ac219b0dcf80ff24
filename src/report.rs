//! Plain-text rendering of graphs, matrices, and routes.

use crate::error::RouteResult;
use crate::graph::{DistanceMatrix, Graph};
use std::fmt::Write;

/// Renders a cost in minutes as `"H h M min"`.
///
/// ```
/// assert_eq!(u_tour::report::format_minutes(80), "1 h 20 min");
/// assert_eq!(u_tour::report::format_minutes(45), "0 h 45 min");
/// ```
pub fn format_minutes(cost: u64) -> String {
    format!("{} h {} min", cost / 60, cost % 60)
}

/// Tab-separated table of the matrix with row and column indices.
///
/// Unknown entries render as `-`.
pub fn format_matrix(matrix: &DistanceMatrix) -> String {
    let mut out = String::from("\t");
    for j in 0..matrix.size() {
        let _ = write!(out, "{j}\t");
    }
    for (i, row) in matrix.rows().enumerate() {
        let _ = write!(out, "\n{i}");
        for &cost in row {
            if cost == DistanceMatrix::UNKNOWN {
                out.push_str("\t-");
            } else {
                let _ = write!(out, "\t{cost}");
            }
        }
    }
    out
}

/// One line per node: id, name, position, and outgoing edges.
pub fn format_node_list(graph: &Graph) -> String {
    let mut out = String::new();
    for node in graph.nodes() {
        let (x, y) = node.position();
        let _ = write!(out, "{} ({}) ({x}, {y}), edges to: ", node.id(), node.name());
        let edges: Vec<String> = node
            .edges()
            .map(|(to, weight)| format!("{to} ({weight})"))
            .collect();
        out.push_str(&edges.join(", "));
        out.push('\n');
    }
    out
}

/// Node names along `route` joined by arrows, then the tour length.
///
/// # Errors
/// Returns [`RouteError::UnknownNode`](crate::RouteError::UnknownNode) if
/// the route names a node the graph lacks.
pub fn format_route(graph: &Graph, route: &[usize], cost: u64) -> RouteResult<String> {
    let names = route
        .iter()
        .map(|&id| graph.node(id).map(|node| node.name()))
        .collect::<RouteResult<Vec<_>>>()?;
    Ok(format!(
        "{}\nPath length = {}",
        names.join(" -> "),
        format_minutes(cost)
    ))
}
