//! Engine configuration.
//!
//! [`EaConfig`] holds every hyperparameter of a run. Operator probabilities
//! are fixed for the whole run.

use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the [`EvolutionEngine`](super::EvolutionEngine).
///
/// # Defaults
///
/// ```
/// use evocomb::ga::EaConfig;
///
/// let config = EaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evocomb::ga::{EaConfig, Selection};
///
/// let config = EaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Roulette)
///     .with_crossover_probability(0.7)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
///
/// Setters store values as given; out-of-range values are reported by
/// [`validate`](EaConfig::validate) rather than clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of breeding cycles. Zero is allowed: the initial population is
    /// evaluated and its best individual reported.
    pub generations: usize,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// Without crossover the pair is copied into the next generation.
    pub crossover_probability: f64,

    /// Mutation probability handed to the genotype's mutation rule (0.0–1.0).
    ///
    /// Bitstrings use it per bit; permutations use it per individual.
    pub mutation_probability: f64,

    /// Selection policy for filling the breeding pool.
    pub selection: Selection,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Whether to evaluate fitness on the rayon thread pool.
    ///
    /// Has no effect without the `parallel` feature. Results do not depend
    /// on this flag.
    pub parallel: bool,

    /// Stop after this many generations without a best-fitness improvement.
    pub stagnation_limit: Option<usize>,

    /// Stop once the best fitness reaches this value.
    pub target_fitness: Option<f64>,

    /// Wall-clock limit in milliseconds, checked between generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            crossover_probability: 0.8,
            mutation_probability: 0.1,
            selection: Selection::default(),
            seed: None,
            parallel: true,
            stagnation_limit: None,
            target_fitness: None,
            time_limit_ms: None,
        }
    }
}

impl EaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the selection policy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Shorthand for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops the run after `window` generations without improvement.
    pub fn with_stagnation_limit(mut self, window: usize) -> Self {
        self.stagnation_limit = Some(window);
        self
    }

    /// Stops the run once the best fitness reaches `target`.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    /// Stops the run after roughly `ms` milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Parameters of the original knapsack driver.
    ///
    /// - Population: 1000, Generations: 300
    /// - Crossover: 0.8, Mutation: 0.1, Tournament size: 40
    pub fn knapsack() -> Self {
        Self {
            population_size: 1000,
            generations: 300,
            selection: Selection::Tournament(40),
            ..Self::default()
        }
    }

    /// Parameters of the original TSP driver.
    ///
    /// - Population: 100, Generations: 100
    /// - Crossover: 0.8, Mutation: 0.1, Tournament size: 5
    pub fn tsp() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            selection: Selection::Tournament(5),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationSize);
        }
        check_probability("crossover_probability", self.crossover_probability)?;
        check_probability("mutation_probability", self.mutation_probability)?;
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::TournamentSize);
        }
        if self.stagnation_limit == Some(0) {
            return Err(ConfigError::StagnationLimit);
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() {
                return Err(ConfigError::TargetFitness(target));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::TimeLimit);
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 100);
        assert_eq!(config.selection, Selection::Tournament(5));
        assert!((config.crossover_probability - 0.8).abs() < 1e-10);
        assert!((config.mutation_probability - 0.1).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.stagnation_limit.is_none());
        assert!(config.target_fitness.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EaConfig::default()
            .with_population_size(31)
            .with_generations(0)
            .with_selection(Selection::Roulette)
            .with_crossover_probability(1.0)
            .with_mutation_probability(0.0)
            .with_stagnation_limit(10)
            .with_target_fitness(4.5)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 31);
        assert_eq!(config.generations, 0);
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.crossover_probability, 1.0);
        assert_eq!(config.mutation_probability, 0.0);
        assert_eq!(config.stagnation_limit, Some(10));
        assert_eq!(config.target_fitness, Some(4.5));
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_population_zero() {
        let config = EaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::PopulationSize));
    }

    #[test]
    fn test_validate_single_individual_ok() {
        assert!(EaConfig::default().with_population_size(1).validate().is_ok());
    }

    #[test]
    fn test_probabilities_not_clamped() {
        let config = EaConfig::default().with_crossover_probability(1.5);
        assert_eq!(config.crossover_probability, 1.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Probability {
                name: "crossover_probability",
                value: 1.5
            })
        );

        let config = EaConfig::default().with_mutation_probability(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability {
                name: "mutation_probability",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_nan_probability() {
        let config = EaConfig::default().with_mutation_probability(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tournament_zero() {
        let config = EaConfig::default().with_tournament_size(0);
        assert_eq!(config.validate(), Err(ConfigError::TournamentSize));
    }

    #[test]
    fn test_validate_stopping_options() {
        assert_eq!(
            EaConfig::default().with_stagnation_limit(0).validate(),
            Err(ConfigError::StagnationLimit)
        );
        assert!(matches!(
            EaConfig::default()
                .with_target_fitness(f64::INFINITY)
                .validate(),
            Err(ConfigError::TargetFitness(_))
        ));
        assert_eq!(
            EaConfig::default().with_time_limit_ms(0).validate(),
            Err(ConfigError::TimeLimit)
        );
    }

    #[test]
    fn test_presets() {
        let k = EaConfig::knapsack();
        assert_eq!(k.population_size, 1000);
        assert_eq!(k.generations, 300);
        assert_eq!(k.selection, Selection::Tournament(40));
        assert!(k.validate().is_ok());

        let t = EaConfig::tsp().with_seed(3);
        assert_eq!(t.population_size, 100);
        assert_eq!(t.selection, Selection::Tournament(5));
        assert_eq!(t.seed, Some(3));
        assert!(t.validate().is_ok());
    }
}
