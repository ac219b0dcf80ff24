//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → sort → roulette selection → pairwise crossover and
//! mutation → best tracking → repeat.

use super::config::GaConfig;
use super::selection::RouletteWheel;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::{GenerationError, RouteError, RouteResult};
use log::{debug, info, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Progress summary for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats<F> {
    /// Generation index; 0 is the initial random population.
    pub generation: usize,
    /// Best fitness within this generation.
    pub best_in_generation: F,
    /// Best fitness seen so far, including this generation.
    pub best_overall: F,
    /// Generation in which `best_overall` was first reached.
    pub best_generation: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Generation in which `best` was first found.
    pub best_generation: usize,

    /// Number of generations produced after the initial one.
    pub generations: usize,

    /// Whether the run stopped because of the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Set when a generation could not be produced; the run stopped there.
    pub aborted: Option<GenerationError>,

    /// Best overall fitness after the initial population and after each
    /// produced generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tour::ga::{GaConfig, GaRunner, TourProblem};
/// use u_tour::graph::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0, 10, 15, 20],
///     vec![10, 0, 35, 25],
///     vec![15, 35, 0, 30],
///     vec![20, 25, 30, 0],
/// ])?;
/// let problem = TourProblem::new(&matrix)?;
/// let config = GaConfig::default().with_max_generations(200).with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// assert!(result.best_fitness >= 80);
/// # Ok::<(), u_tour::RouteError>(())
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`RouteError::Config`](crate::RouteError::Config) if the
    /// configuration is invalid. Failures while producing a generation are
    /// not errors: see [`GaResult::aborted`].
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> RouteResult<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before producing the next generation and return the best
    /// solution found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RouteResult<GaResult<P::Individual>> {
        config.validate()?;

        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));

        // 1. Initialize population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        // 2. Track best
        let Some(mut best) = find_best(&population).cloned() else {
            return Err(RouteError::config("population_size must be at least 1"));
        };
        let mut best_generation = 0usize;
        let mut fitness_history = vec![best.fitness().to_f64()];
        problem.on_generation(&GenerationStats {
            generation: 0,
            best_in_generation: best.fitness(),
            best_overall: best.fitness(),
            best_generation,
        });

        let mut generation = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut aborted = None;

        // 3. Evolutionary loop
        loop {
            if config.max_generations.is_some_and(|max| generation >= max) {
                break;
            }
            if config
                .stagnation_limit
                .is_some_and(|limit| stagnation_counter > limit)
            {
                stagnated = true;
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let gen_best = match next_generation(problem, &mut population, config, &mut rng) {
                Ok(gen_best) => gen_best,
                Err(err) => {
                    warn!("generation {} aborted: {err}", generation + 1);
                    aborted = Some(err);
                    break;
                }
            };
            generation += 1;

            // Update best
            let gen_best_fitness = gen_best.fitness();
            if gen_best_fitness < best.fitness() {
                best = gen_best;
                best_generation = generation;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            fitness_history.push(best.fitness().to_f64());

            let stats = GenerationStats {
                generation,
                best_in_generation: gen_best_fitness,
                best_overall: best.fitness(),
                best_generation,
            };
            debug!(
                "generation {}: best {:?}, overall {:?} (generation {})",
                stats.generation, stats.best_in_generation, stats.best_overall, stats.best_generation
            );
            problem.on_generation(&stats);
        }

        info!(
            "GA finished after {generation} generations: best {:?} found in generation {best_generation}",
            best.fitness()
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            best_generation,
            generations: generation,
            stagnated,
            cancelled,
            aborted,
            fitness_history,
        })
    }
}

/// Replaces `population` with the next generation and returns a clone of
/// its best individual.
///
/// Each slot draws one individual from the roulette wheel of the sorted
/// previous generation. After every second slot the last two picks are,
/// with probability `crossover_rate`, replaced by their two children
/// (`a × b` and `b × a`), each mutated. A trailing odd pick stays as is.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    population: &mut Vec<P::Individual>,
    config: &GaConfig,
    rng: &mut R,
) -> Result<P::Individual, GenerationError> {
    // Sort population by fitness (ascending = best first)
    population.sort_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let wheel = RouletteWheel::new(population.as_slice())?;

    let mut next_gen: Vec<P::Individual> = Vec::with_capacity(config.population_size);
    for slot in 0..config.population_size {
        next_gen.push(population[wheel.spin(rng)].clone());

        if slot % 2 == 1 && rng.random_range(0.0..1.0) < config.crossover_rate {
            let (first, second) = (&next_gen[slot - 1], &next_gen[slot]);
            let mut child1 = problem.crossover(first, second, rng)?;
            problem.mutate(&mut child1, config.mutation_rate, rng);
            let mut child2 = problem.crossover(second, first, rng)?;
            problem.mutate(&mut child2, config.mutation_rate, rng);
            next_gen[slot - 1] = child1;
            next_gen[slot] = child2;
        }
    }

    let gen_best = find_best(&next_gen)
        .cloned()
        .ok_or(GenerationError::EmptyPopulation)?;
    *population = next_gen;
    Ok(gen_best)
}

/// Find the individual with the best (lowest) fitness.
///
/// Ties keep the earliest individual.
fn find_best<I: Individual>(population: &[I]) -> Option<&I> {
    population.iter().reduce(|best, ind| {
        if ind.fitness() < best.fitness() {
            ind
        } else {
            best
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
