//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{RouteError, RouteResult};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, None);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(2_000)
///     .with_stagnation_limit(200)
///     .with_crossover_rate(0.9)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Maximum number of generations produced after the initial one.
    ///
    /// `None` disables this limit.
    pub max_generations: Option<usize>,

    /// The run stops once more than this many consecutive generations
    /// failed to improve the best tour.
    ///
    /// `None` disables stagnation-based termination.
    pub stagnation_limit: Option<usize>,

    /// Probability of crossing a selected pair (0.0–1.0).
    ///
    /// When crossover is not applied, both selected individuals pass
    /// through unchanged.
    pub crossover_rate: f64,

    /// Per-gene probability of an adjacent swap in a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: None,
            stagnation_limit: Some(5_000_000),
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Builds a validated configuration from the integer convention used by
    /// external config files, where `-1` means "no limit".
    ///
    /// Any other negative limit is rejected.
    pub fn from_sentinels(
        population_size: i64,
        max_generations: i64,
        stagnation_limit: i64,
        crossover_rate: f64,
        mutation_rate: f64,
    ) -> RouteResult<Self> {
        let population_size = usize::try_from(population_size)
            .map_err(|_| RouteError::config("population_size must be positive"))?;
        let config = Self {
            population_size,
            max_generations: limit_from_sentinel("max_generations", max_generations)?,
            stagnation_limit: limit_from_sentinel("stagnation_limit", stagnation_limit)?,
            crossover_rate,
            mutation_rate,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Removes the generation limit.
    pub fn without_generation_limit(mut self) -> Self {
        self.max_generations = None;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = Some(limit);
        self
    }

    /// Disables stagnation-based termination.
    pub fn without_stagnation_limit(mut self) -> Self {
        self.stagnation_limit = None;
        self
    }

    /// Sets the crossover rate. Out-of-range values fail [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Out-of-range values fail [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`RouteError::Config`] with a description if any parameter
    /// is invalid.
    pub fn validate(&self) -> RouteResult<()> {
        if self.population_size == 0 {
            return Err(RouteError::config("population_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(RouteError::config(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(RouteError::config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

fn limit_from_sentinel(name: &str, value: i64) -> RouteResult<Option<usize>> {
    match value {
        -1 => Ok(None),
        v => usize::try_from(v)
            .map(Some)
            .map_err(|_| RouteError::config(format!("{name} must be -1 or non-negative, got {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.max_generations, None);
        assert_eq!(config.stagnation_limit, Some(5_000_000));
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_stagnation_limit(100)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.05)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, Some(1000));
        assert_eq!(config.stagnation_limit, Some(100));
        assert!((config.crossover_rate - 0.7).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.seed, Some(42));

        let config = config.without_generation_limit().without_stagnation_limit();
        assert_eq!(config.max_generations, None);
        assert_eq!(config.stagnation_limit, None);
    }

    #[test]
    fn test_validate_zero_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(config.validate(), Err(RouteError::Config { .. })));
    }

    #[test]
    fn test_validate_rates() {
        assert!(GaConfig::default().with_crossover_rate(1.5).validate().is_err());
        assert!(GaConfig::default().with_crossover_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(2.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_from_sentinels() {
        let config = GaConfig::from_sentinels(10, -1, 5_000_000, 0.8, 0.1).unwrap();
        assert_eq!(config.max_generations, None);
        assert_eq!(config.stagnation_limit, Some(5_000_000));

        let config = GaConfig::from_sentinels(4, 100, -1, 0.5, 0.5).unwrap();
        assert_eq!(config.max_generations, Some(100));
        assert_eq!(config.stagnation_limit, None);
    }

    #[test]
    fn test_from_sentinels_rejects_bad_values() {
        assert!(GaConfig::from_sentinels(0, -1, -1, 0.8, 0.1).is_err());
        assert!(GaConfig::from_sentinels(-3, -1, -1, 0.8, 0.1).is_err());
        assert!(GaConfig::from_sentinels(10, -2, -1, 0.8, 0.1).is_err());
        assert!(GaConfig::from_sentinels(10, -1, -1, 1.2, 0.1).is_err());
    }
}
