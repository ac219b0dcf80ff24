//! Shortest-path search and distance-matrix completion.
//!
//! - [`find_path`]: A* over a [`Graph`](crate::graph::Graph), guided by the
//!   Euclidean estimate between node positions
//! - [`complete_matrix`]: resolves every pair without a direct edge and
//!   records the path behind each entry in a [`PathTable`]
//!
//! # References
//!
//! - Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//!   Determination of Minimum Cost Paths"

mod astar;
mod completion;

pub use astar::{find_path, Path};
pub use completion::{complete_matrix, Completion, PathTable};
