//! Ordered collection of individuals.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::individual::Individual;
use super::types::{FitnessFunction, Genotype};
use crate::error::{EaError, Result};

/// An ordered collection of [`Individual`]s.
///
/// The engine builds a fresh population every generation; individuals are
/// never shared between two populations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
}

impl<G: Genotype> Population<G> {
    /// Wraps existing individuals.
    pub fn new(individuals: Vec<Individual<G>>) -> Self {
        Self { individuals }
    }

    /// An empty population with room for `capacity` individuals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Builds a population of exactly `size` individuals from `make`.
    pub fn generate<F>(size: usize, mut make: F) -> Self
    where
        F: FnMut() -> G,
    {
        Self {
            individuals: (0..size).map(|_| Individual::new(make())).collect(),
        }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if there are no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individuals, in current order.
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// The individual at `index`.
    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    /// Iterates the individuals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    /// Appends `individual`.
    pub fn push(&mut self, individual: Individual<G>) {
        self.individuals.push(individual);
    }

    /// Consumes the population, returning its individuals.
    pub fn into_individuals(self) -> Vec<Individual<G>> {
        self.individuals
    }

    /// Evaluates every individual lacking a cached fitness.
    ///
    /// With `parallel` set (and the `parallel` feature enabled) evaluation is
    /// spread over the rayon thread pool. Returns the number of fitness
    /// computations performed.
    pub fn evaluate<F>(&mut self, function: &F, parallel: bool) -> usize
    where
        F: FitnessFunction<Genotype = G> + ?Sized,
    {
        let pending = self.individuals.iter().filter(|i| !i.is_evaluated()).count();
        if pending == 0 {
            return 0;
        }

        #[cfg(feature = "parallel")]
        {
            if parallel {
                self.individuals.par_iter_mut().for_each(|ind| {
                    ind.evaluate(function);
                });
                return pending;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for ind in self.individuals.iter_mut() {
            ind.evaluate(function);
        }
        pending
    }

    /// Sorts by fitness, best (highest) first.
    ///
    /// The sort is stable. Fails if the population is empty or any
    /// individual is unevaluated.
    pub fn sort_descending(&mut self) -> Result<()> {
        self.require_evaluated()?;
        self.individuals.sort_by(|a, b| compare_desc(a, b));
        Ok(())
    }

    /// The individual with the highest fitness; the first one on ties.
    pub fn best(&self) -> Result<&Individual<G>> {
        self.require_evaluated()?;
        let mut best = &self.individuals[0];
        for ind in &self.individuals[1..] {
            if score(ind) > score(best) {
                best = ind;
            }
        }
        Ok(best)
    }

    /// Scores in population order.
    ///
    /// Fails if the population is empty or any individual is unevaluated.
    pub fn fitness_values(&self) -> Result<Vec<f64>> {
        if self.individuals.is_empty() {
            return Err(EaError::EmptyPopulation);
        }
        self.individuals
            .iter()
            .enumerate()
            .map(|(index, ind)| ind.fitness_value().ok_or(EaError::Unevaluated { index }))
            .collect()
    }

    fn require_evaluated(&self) -> Result<()> {
        if self.individuals.is_empty() {
            return Err(EaError::EmptyPopulation);
        }
        match self.individuals.iter().position(|i| !i.is_evaluated()) {
            Some(index) => Err(EaError::Unevaluated { index }),
            None => Ok(()),
        }
    }
}

impl<'a, G> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

fn score<G: Genotype>(ind: &Individual<G>) -> f64 {
    ind.fitness_value().unwrap_or(f64::NEG_INFINITY)
}

fn compare_desc<G: Genotype>(a: &Individual<G>, b: &Individual<G>) -> Ordering {
    score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal)
}
