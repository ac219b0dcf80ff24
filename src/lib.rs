//! Closed-tour route planning over sparse directed graphs.
//!
//! Solves the travelling-salesman problem on a road-network style graph
//! where most node pairs have no direct edge:
//!
//! - **Graph**: Named nodes with planar coordinates and weighted directed
//!   edges, plus the dense [`DistanceMatrix`](graph::DistanceMatrix) built
//!   from them.
//! - **Path**: A* shortest paths with a straight-line heuristic, used to
//!   fill every missing matrix entry and to remember the node path behind
//!   each one.
//! - **Genetic Algorithm (GA)**: Permutation tours evolved with edge
//!   crossover, adjacent-swap mutation, roulette selection, and elitist
//!   best tracking.
//! - **Planning**: [`plan_route`] chains the above and expands the best
//!   tour back into a walk over real edges.
//!
//! # Example
//!
//! ```
//! use u_tour::ga::GaConfig;
//! use u_tour::graph::Graph;
//!
//! let graph = Graph::from_parts(
//!     vec![(0, "A", 0.0, 0.0), (1, "B", 3.0, 0.0), (2, "C", 3.0, 4.0)],
//!     vec![(0, 1, 3), (1, 2, 4), (2, 0, 5)],
//! )?;
//! let config = GaConfig::default().with_max_generations(50).with_seed(42);
//! let plan = u_tour::plan_route(graph, &config)?;
//! assert_eq!(plan.cost, 12);
//! assert_eq!(plan.route.len(), 4);
//! # Ok::<(), u_tour::RouteError>(())
//! ```
//!
//! # Logging
//!
//! Progress is reported through the [`log`] facade; install any logger
//! (for example `env_logger`) to see it.

pub mod error;
pub mod ga;
pub mod graph;
pub mod input;
pub mod path;
pub mod plan;
pub mod report;

pub use error::{GenerationError, RouteError, RouteResult};
pub use plan::{plan_route, RoutePlan};
