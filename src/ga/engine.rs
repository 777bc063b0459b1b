//! The generational evolutionary loop.
//!
//! [`EvolutionEngine`] owns the problem, the population and a single seeded
//! random stream. Each generation runs
//! evaluation → sorting → breeding → replacement:
//!
//! 1. every unevaluated individual gets its fitness computed (optionally in
//!    parallel; evaluation draws no random numbers)
//! 2. the population is sorted best first and summarized
//! 3. a breeding pool of `population_size` parents is drawn with replacement
//! 4. consecutive pool pairs are recombined (with `crossover_probability`)
//!    or copied, each child is mutated, and children fill a brand-new
//!    population of exactly `population_size`
//!
//! After the last generation one more evaluation and sort is done and the
//! top individual is reported.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::EaConfig;
use super::individual::Individual;
use super::population::Population;
use super::stopping::{GenerationStats, StopPredicate, StopReason, StopTracker};
use super::types::{Genotype, Problem};
use crate::error::{ConfigError, EaError, Result};

/// Where the engine currently is in the generational cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Evaluating,
    Sorting,
    Breeding,
    Replacing,
    Terminated,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunResult<G> {
    /// Fittest individual of the final population.
    pub best: Individual<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of breeding cycles executed.
    pub generations: usize,

    /// Why the loop ended.
    pub stop_reason: StopReason,

    /// One entry per evaluated generation, initial population first.
    pub history: Vec<GenerationStats>,

    /// Final population, sorted best first.
    pub population: Population<G>,
}

/// Runs a generational EA over a [`Problem`].
///
/// # Usage
///
/// ```
/// use evocomb::ga::{EaConfig, EvolutionEngine};
/// use evocomb::problems::KnapsackInstance;
///
/// let items = KnapsackInstance::new(vec![1, 2, 3, 4], vec![10, 8, 4, 1]).unwrap();
/// let config = EaConfig::default()
///     .with_population_size(20)
///     .with_generations(10)
///     .with_seed(42);
/// let result = EvolutionEngine::new(items, config).unwrap().run().unwrap();
/// assert_eq!(result.history.len(), 11);
/// ```
pub struct EvolutionEngine<P: Problem> {
    problem: P,
    config: EaConfig,
    rng: StdRng,
    population: Population<P::Genotype>,
    phase: Phase,
    generation: usize,
    history: Vec<GenerationStats>,
    tracker: StopTracker,
    stop_predicate: Option<StopPredicate>,
}

impl<P: Problem> EvolutionEngine<P> {
    /// Validates `config` and builds the random initial population.
    pub fn new(problem: P, config: EaConfig) -> Result<Self> {
        config.validate()?;
        let genotype_len = problem.genotype_len();
        if genotype_len == 0 {
            return Err(ConfigError::GenotypeLength.into());
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let population =
            Population::generate(config.population_size, || problem.random_genotype(&mut rng));

        info!(
            "initialized population of {} (genotype length {}, seed {})",
            config.population_size, genotype_len, seed
        );

        Ok(Self {
            tracker: StopTracker::new(&config),
            problem,
            config,
            rng,
            population,
            phase: Phase::Initializing,
            generation: 0,
            history: Vec::new(),
            stop_predicate: None,
        })
    }

    /// Installs a custom stopping rule, checked after every generation.
    pub fn with_stop_predicate<F>(mut self, predicate: F) -> Self
    where
        F: FnMut(&[GenerationStats]) -> bool + Send + 'static,
    {
        self.stop_predicate = Some(Box::new(predicate));
        self
    }

    /// The problem instance.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The run configuration.
    pub fn config(&self) -> &EaConfig {
        &self.config
    }

    /// The current population.
    pub fn population(&self) -> &Population<P::Genotype> {
        &self.population
    }

    /// Current phase of the generational cycle.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of breeding cycles completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Statistics of every generation evaluated so far.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Evaluates and sorts the current population, then breeds the next one.
    ///
    /// Returns the statistics of the generation that was evaluated.
    pub fn step(&mut self) -> Result<GenerationStats> {
        let stats = self.evaluate_and_sort()?;
        self.breed()?;
        Ok(stats)
    }

    /// Final evaluation and sort; leaves the engine terminated.
    pub fn finish(&mut self) -> Result<GenerationStats> {
        let stats = self.evaluate_and_sort()?;
        self.phase = Phase::Terminated;
        Ok(stats)
    }

    /// Runs all configured generations.
    pub fn run(self) -> Result<RunResult<P::Genotype>> {
        self.run_with(None, |_, _| {})
    }

    /// Runs with a cancellation flag checked between generations.
    ///
    /// A cancelled run still returns the best individual of a fully
    /// evaluated population.
    pub fn run_with_cancel(self, cancel: Arc<AtomicBool>) -> Result<RunResult<P::Genotype>> {
        self.run_with(Some(cancel), |_, _| {})
    }

    /// Runs, calling `observer` with the stats and best individual of every
    /// evaluated generation, the final pass included.
    pub fn run_with_observer<O>(self, observer: O) -> Result<RunResult<P::Genotype>>
    where
        O: FnMut(&GenerationStats, &Individual<P::Genotype>),
    {
        self.run_with(None, observer)
    }

    /// Runs with an optional cancellation flag and a per-generation observer.
    pub fn run_with<O>(
        mut self,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: O,
    ) -> Result<RunResult<P::Genotype>>
    where
        O: FnMut(&GenerationStats, &Individual<P::Genotype>),
    {
        let started = Instant::now();
        let time_limit = self.config.time_limit_ms.map(Duration::from_millis);
        let mut stop_reason = StopReason::GenerationsExhausted;
        let mut sorted = false;

        while self.generation < self.config.generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                stop_reason = StopReason::Cancelled;
                break;
            }
            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                stop_reason = StopReason::TimeLimit;
                break;
            }

            let stats = self.evaluate_and_sort()?;
            observer(&stats, &self.population.individuals()[0]);

            if let Some(reason) = self.check_stop(&stats) {
                stop_reason = reason;
                sorted = true;
                break;
            }

            self.breed()?;
        }

        if !sorted {
            let stats = self.evaluate_and_sort()?;
            observer(&stats, &self.population.individuals()[0]);
        }
        self.phase = Phase::Terminated;

        let best = self.population.individuals()[0].clone();
        let best_fitness = best.fitness_value().ok_or(EaError::Unevaluated { index: 0 })?;

        info!(
            "stopped after {} generations ({:?}); best fitness {}",
            self.generation, stop_reason, best_fitness
        );

        Ok(RunResult {
            best,
            best_fitness,
            generations: self.generation,
            stop_reason,
            history: self.history,
            population: self.population,
        })
    }

    fn evaluate_and_sort(&mut self) -> Result<GenerationStats> {
        self.phase = Phase::Evaluating;
        let computed = self.population.evaluate(&self.problem, self.config.parallel);
        trace!("generation {}: {} fitness evaluations", self.generation, computed);

        self.phase = Phase::Sorting;
        self.population.sort_descending()?;

        let fitnesses = self.population.fitness_values()?;
        let stats = GenerationStats::from_sorted(self.generation, &fitnesses)
            .ok_or(EaError::EmptyPopulation)?;
        debug!(
            "generation {}: best {:.6}, mean {:.6}",
            stats.generation, stats.best_fitness, stats.mean_fitness
        );
        self.history.push(stats);
        Ok(stats)
    }

    fn check_stop(&mut self, stats: &GenerationStats) -> Option<StopReason> {
        if let Some(reason) = self.tracker.observe(stats) {
            return Some(reason);
        }
        let predicate = self.stop_predicate.as_mut()?;
        predicate(&self.history).then_some(StopReason::Predicate)
    }

    fn breed(&mut self) -> Result<()> {
        self.phase = Phase::Breeding;
        let size = self.config.population_size;
        let pool = (0..size)
            .map(|_| self.config.selection.select(&self.population, &mut self.rng))
            .collect::<Result<Vec<usize>>>()?;

        self.phase = Phase::Replacing;
        let next = reproduce(
            &self.population,
            &pool,
            size,
            self.config.crossover_probability,
            self.config.mutation_probability,
            &mut self.rng,
        );
        debug_assert!(next
            .iter()
            .all(|i| i.genotype().is_valid(self.problem.genotype_len())));

        self.population = next;
        self.generation += 1;
        Ok(())
    }
}

/// Builds the next generation from consecutive pool pairs.
///
/// With an odd pool the last parent is paired with the first, and only one
/// of that pair's children is kept. Children are always independent copies.
fn reproduce<G: Genotype, R: Rng>(
    parents: &Population<G>,
    pool: &[usize],
    size: usize,
    crossover_probability: f64,
    mutation_probability: f64,
    rng: &mut R,
) -> Population<G> {
    let individuals = parents.individuals();
    let mut next = Population::with_capacity(size);
    let mut crossovers = 0usize;

    let mut i = 0;
    while next.len() < size {
        let a = &individuals[pool[i % pool.len()]];
        let b = &individuals[pool[(i + 1) % pool.len()]];
        i += 2;

        let (c1, c2) = if rng.random::<f64>() < crossover_probability {
            crossovers += 1;
            a.crossover(b, rng)
        } else {
            (a.clone(), b.clone())
        };

        for mut child in [c1, c2] {
            if next.len() >= size {
                break;
            }
            child.mutate(mutation_probability, rng);
            next.push(child);
        }
    }

    trace!("bred {} children, {} crossovers", next.len(), crossovers);
    next
}
