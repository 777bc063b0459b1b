//! Core trait definitions for the engine.
//!
//! [`Genotype`], [`FitnessFunction`] and [`Problem`] are the contract between
//! the generic [`EvolutionEngine`](super::EvolutionEngine) and a concrete
//! problem representation.

use rand::Rng;

/// An encoded candidate solution.
///
/// A genotype has a fixed length for the lifetime of a run. Both operators
/// must preserve the representation's validity rule (see
/// [`is_valid`](Genotype::is_valid)).
pub trait Genotype: Clone + Send + Sync + std::fmt::Debug {
    /// Number of genes.
    fn len(&self) -> usize;

    /// Returns `true` if the genotype has no genes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies the representation's mutation rule with probability `p`.
    ///
    /// Returns `true` if any gene changed, so the caller knows whether a
    /// cached fitness is still valid.
    fn mutate<R: Rng>(&mut self, p: f64, rng: &mut R) -> bool;

    /// Recombines `self` with `other`, producing exactly two children.
    ///
    /// Children are freshly allocated; neither parent is modified.
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self);

    /// Checks the representation invariant for a genotype of `expected_len`.
    fn is_valid(&self, expected_len: usize) -> bool;
}

/// Maps a genotype to a scalar fitness. Higher is better.
///
/// Implementations must be pure: the same genotype always yields the same
/// value. `Send + Sync` lets the engine evaluate a generation on worker
/// threads.
pub trait FitnessFunction: Send + Sync {
    /// The genotype this function scores.
    type Genotype: Genotype;

    /// Computes the fitness of `genotype`.
    fn evaluate(&self, genotype: &Self::Genotype) -> f64;
}

/// A problem instance the engine can optimize.
///
/// Adds random initialization on top of scoring. Instances are immutable for
/// the duration of a run.
pub trait Problem: FitnessFunction {
    /// Length every genotype of this problem has.
    fn genotype_len(&self) -> usize;

    /// Creates a uniformly random, valid genotype.
    fn random_genotype<R: Rng>(&self, rng: &mut R) -> Self::Genotype;
}
