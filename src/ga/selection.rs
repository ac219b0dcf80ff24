//! Fitness-proportionate (roulette wheel) selection.
//!
//! The wheel is built once per generation from the population sorted best
//! first, then spun once per slot of the next generation. Draws cover a
//! fixed range much wider than the bins, and a draw past the last bin
//! picks the best individual, so selection strongly favours the current
//! best tour while the bins keep some diversity.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::types::{Fitness, Individual};
use crate::error::GenerationError;
use rand::Rng;

/// Width of the bin given to the best individual of a generation.
pub const WHEEL_SCALE: u64 = 100_000;

/// Draws are uniform over `0..DRAW_RANGE` (or the total weight, if larger).
pub const DRAW_RANGE: u64 = 100_000_000;

/// Cumulative selection weights over a sorted population.
///
/// For minimization each fitness is shifted by the generation's best
/// value: `adj_i = f_i - f_best`. With `sum = Σ adj_i > 0`, individual `i`
/// gets a bin of width `WHEEL_SCALE - WHEEL_SCALE * adj_i / sum`, so the
/// best gets the full scale and worse ones proportionally less. When every
/// individual ties (`sum == 0`) the bins are equal.
///
/// The bins total at most `len() * WHEEL_SCALE`, far below [`DRAW_RANGE`],
/// so most spins overshoot and return the best individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouletteWheel {
    cumulative: Vec<u64>,
}

impl RouletteWheel {
    /// Builds the wheel for `population`, which should be sorted by
    /// ascending fitness; bin `i` belongs to `population[i]`.
    pub fn new<I: Individual>(population: &[I]) -> Result<Self, GenerationError> {
        if population.is_empty() {
            return Err(GenerationError::EmptyPopulation);
        }

        let fitnesses: Vec<f64> = population
            .iter()
            .map(|ind| ind.fitness().to_f64())
            .collect();
        let best = fitnesses.iter().cloned().fold(f64::INFINITY, f64::min);
        let sum: f64 = fitnesses.iter().map(|&f| f - best).sum();

        let n = population.len() as u64;
        let cumulative: Vec<u64> = if sum > 0.0 && sum.is_finite() {
            fitnesses
                .iter()
                .scan(0u64, |acc, &f| {
                    let share = (WHEEL_SCALE as f64 * (f - best) / sum) as u64;
                    *acc += WHEEL_SCALE.saturating_sub(share);
                    Some(*acc)
                })
                .collect()
        } else {
            (1..=n).map(|i| WHEEL_SCALE * i / n).collect()
        };

        if cumulative.last().copied().unwrap_or(0) == 0 {
            return Err(GenerationError::DegenerateWheel);
        }
        Ok(Self { cumulative })
    }

    /// Total weight of all bins.
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Returns the first bin whose cumulative bound exceeds `draw`.
    ///
    /// Empty bins are never chosen. `draw` values at or past the total map
    /// to bin 0, the best individual.
    pub fn bin_for(&self, draw: u64) -> usize {
        match self.cumulative.partition_point(|&bound| bound <= draw) {
            bin if bin < self.cumulative.len() => bin,
            _ => 0,
        }
    }

    /// Selects a population index.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let draw = rng.random_range(0..DRAW_RANGE.max(self.total()));
        self.bin_for(draw)
    }
}
