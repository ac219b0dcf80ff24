//! Graph model.
//!
//! Nodes carry a fixed id, name and 2D position plus a sparse map of
//! outgoing weighted edges. The [`Graph`] owns the nodes and exposes
//! neighbor enumeration and the Euclidean estimate used by A*.
//! [`DistanceMatrix`] is the dense all-pairs view the GA consumes.

mod matrix;
mod model;
mod node;

pub use matrix::DistanceMatrix;
pub use model::Graph;
pub use node::{Edge, Node};
