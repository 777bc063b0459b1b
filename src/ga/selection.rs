//! Parent selection policies.
//!
//! Selection picks one individual from the current population, favoring
//! higher fitness. It never modifies the population; it returns the index of
//! the chosen individual so the breeding pool can refer back to it.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

use super::population::Population;
use super::types::Genotype;
use crate::error::{ConfigError, EaError, Result};

/// Selection policy for choosing parents.
///
/// All policies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use evocomb::ga::Selection;
///
/// // Best of 5 uniformly drawn individuals
/// let sel = Selection::Tournament(5);
///
/// // Fitness-proportionate
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` individuals uniformly with
    /// replacement, keep the fittest.
    ///
    /// Ties go to the first individual drawn. Larger `k` means stronger
    /// selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Requires non-negative fitness values. When every fitness is zero the
    /// wheel has no area and the draw falls back to a uniform pick.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(5)
    }
}

impl Selection {
    /// Selects a parent index from `population`.
    ///
    /// Fails with [`EaError::EmptyPopulation`] on an empty population and
    /// with [`EaError::Unevaluated`] if a drawn individual has no fitness.
    /// `Tournament(0)` is rejected with [`ConfigError::TournamentSize`].
    pub fn select<G: Genotype, R: Rng>(
        &self,
        population: &Population<G>,
        rng: &mut R,
    ) -> Result<usize> {
        if population.is_empty() {
            return Err(EaError::EmptyPopulation);
        }

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
        }
    }
}

fn fitness_at<G: Genotype>(population: &Population<G>, index: usize) -> Result<f64> {
    population
        .get(index)
        .and_then(|ind| ind.fitness_value())
        .ok_or(EaError::Unevaluated { index })
}

/// Tournament selection: draw k random individuals, return the best.
fn tournament<G: Genotype, R: Rng>(
    population: &Population<G>,
    k: usize,
    rng: &mut R,
) -> Result<usize> {
    if k == 0 {
        return Err(ConfigError::TournamentSize.into());
    }
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    let mut best_fit = fitness_at(population, best_idx)?;
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let fit = fitness_at(population, idx)?;
        if fit > best_fit {
            best_idx = idx;
            best_fit = fit;
        }
    }
    Ok(best_idx)
}

/// Roulette wheel selection over raw fitness.
///
/// Draws `threshold` in `[0, total)` and returns the first individual whose
/// cumulative fitness reaches it.
fn roulette<G: Genotype, R: Rng>(population: &Population<G>, rng: &mut R) -> Result<usize> {
    let fitnesses = population.fitness_values()?;
    let n = fitnesses.len();
    if n == 1 {
        return Ok(0);
    }

    let total: f64 = fitnesses.iter().sum();
    if total.is_infinite() {
        if let Some(i) = fitnesses.iter().position(|f| f.is_infinite()) {
            return Ok(i);
        }
    }
    if !(total > 0.0 && total.is_finite()) {
        return Ok(rng.random_range(0..n));
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &f) in fitnesses.iter().enumerate() {
        cumulative += f;
        if cumulative >= threshold {
            return Ok(i);
        }
    }

    Ok(n - 1) // floating-point fallback
}
