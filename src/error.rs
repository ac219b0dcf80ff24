//! Error types for tour planning.
//!
//! Only hard failures surface here. A generation that cannot be produced
//! is not an error for the caller: the GA runner stops and returns the best
//! tour found so far.

use thiserror::Error;

/// Result type alias for u-tour operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Unified error type for graph construction, matrix completion and
/// solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    // ===== Graph model =====
    /// The graph has no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A node id outside `0..node_count` was referenced.
    #[error("unknown node id {id} (graph has {node_count} nodes)")]
    UnknownNode {
        /// The offending id.
        id: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// Node ids must be dense and appear in order `0, 1, 2, ...`.
    #[error("node at position {position} has id {id}; ids must be dense from 0")]
    NonDenseNodeId {
        /// Position in the input sequence.
        position: usize,
        /// The id found at that position.
        id: usize,
    },

    // ===== Shortest-path search =====
    /// The open set was exhausted before reaching the goal.
    #[error("no path from node {start} to node {goal}")]
    Unreachable {
        /// Search start.
        start: usize,
        /// Search goal.
        goal: usize,
    },

    // ===== Distance matrix =====
    /// A matrix entry is still unknown where a complete matrix is required.
    #[error("distance matrix entry [{from}][{to}] is unknown")]
    IncompleteMatrix {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
    },

    /// A chromosome or matrix does not have the expected dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// A visiting order repeats or omits a node.
    #[error("tour is not a permutation: node {gene} is repeated or out of range")]
    NotAPermutation {
        /// The first offending gene.
        gene: usize,
    },

    // ===== Configuration =====
    /// Invalid GA configuration parameter.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    // ===== Text input =====
    /// Malformed node or edge list.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl RouteError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error at a 1-based line number.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Why a GA generation could not be produced.
///
/// The runner never propagates this: it stops the loop, keeps the best
/// individual found so far and reports the reason in
/// [`GaResult::aborted`](crate::ga::GaResult::aborted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The previous generation had no individuals to select from.
    #[error("previous generation is empty")]
    EmptyPopulation,

    /// Every selection weight was zero.
    #[error("selection wheel has zero total weight")]
    DegenerateWheel,

    /// A problem operator could not produce a child.
    #[error("operator failed: {message}")]
    Operator {
        /// Description from the operator.
        message: String,
    },
}

impl GenerationError {
    /// Create an operator failure with a message.
    #[must_use]
    pub fn operator(message: impl Into<String>) -> Self {
        Self::Operator {
            message: message.into(),
        }
    }
}
