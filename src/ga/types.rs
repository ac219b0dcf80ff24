//! Core trait definitions for the GA framework.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the generation loop and a concrete tour (or any other)
//! representation.

use super::runner::GenerationStats;
use crate::error::GenerationError;
use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is considered better (minimization).
///
/// Tour costs are whole minutes, so `u64` is the built-in implementation.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for selection weights and history.
    fn to_f64(self) -> f64;
}

impl Fitness for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the GA population.
///
/// Unlike a lazily evaluated genome, an individual's fitness is always
/// current: implementations recompute it whenever the genes change
/// (construction, crossover, mutation).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: How to create random individuals
/// 2. **Crossover**: How to recombine two parents into a new child
/// 3. **Mutation**: How to perturb an individual
///
/// The random generator is always passed in by the runner, so a seeded run
/// is fully reproducible.
pub trait GaProblem {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual with its fitness already computed.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Produces one child from `parent1` and `parent2`.
    ///
    /// The operator may be asymmetric; the runner calls it in both orders
    /// to get two children from a pair. Parents are never modified.
    ///
    /// An error stops the run: the runner returns the best individual found
    /// so far and records the error in
    /// [`GaResult::aborted`](super::GaResult::aborted).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Result<Self::Individual, GenerationError>;

    /// Mutates an individual in place, using `rate` as the per-gene
    /// probability.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rate: f64, rng: &mut R);

    /// Called once for the initial population and once per produced
    /// generation.
    ///
    /// Useful for progress reporting. The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats<<Self::Individual as Individual>::Fitness>) {}
}
