//! Genetic Algorithm for closed tours.
//!
//! A small trait-based GA loop plus the tour representation it is used
//! with. Users define their problem by implementing [`GaProblem`], which
//! specifies how to create, crossover, and mutate individuals;
//! [`TourProblem`] is the implementation over a completed
//! [`DistanceMatrix`](crate::graph::DistanceMatrix).
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition: initialization, operators and the progress hook
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, termination limits, operator rates, seed
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//! - [`Tour`]: Visiting order with its cached cycle cost
//!
//! # Submodules
//!
//! - [`operators`]: Edge crossover (EX) and adjacent-swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Whitley (2000), "Permutations", in *Evolutionary Computation 1*

mod config;
pub mod operators;
mod runner;
mod selection;
mod tour;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{RouletteWheel, DRAW_RANGE, WHEEL_SCALE};
pub use tour::{tour_cost, Tour, TourProblem};
pub use types::{Fitness, GaProblem, Individual};
