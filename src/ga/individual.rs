//! A genotype paired with its cached fitness.

use rand::Rng;

use super::types::{FitnessFunction, Genotype};

/// Cached fitness of an [`Individual`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fitness {
    /// Not computed yet, or invalidated by a mutation.
    #[default]
    Unevaluated,
    /// Computed score.
    Evaluated(f64),
}

impl Fitness {
    /// The score, if computed.
    pub fn value(self) -> Option<f64> {
        match self {
            Fitness::Unevaluated => None,
            Fitness::Evaluated(v) => Some(v),
        }
    }

    /// Returns `true` if a score is cached.
    pub fn is_evaluated(self) -> bool {
        matches!(self, Fitness::Evaluated(_))
    }
}

/// A candidate solution: an exclusively owned genotype and its fitness.
///
/// Fitness is computed lazily at most once and cached until a mutation
/// actually changes the genotype.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    genotype: G,
    fitness: Fitness,
}

impl<G: Genotype> Individual<G> {
    /// Creates an unevaluated individual.
    pub fn new(genotype: G) -> Self {
        Self {
            genotype,
            fitness: Fitness::Unevaluated,
        }
    }

    /// The genotype.
    pub fn genotype(&self) -> &G {
        &self.genotype
    }

    /// Consumes the individual, returning its genotype.
    pub fn into_genotype(self) -> G {
        self.genotype
    }

    /// The cached fitness state.
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// The cached score, if any.
    pub fn fitness_value(&self) -> Option<f64> {
        self.fitness.value()
    }

    /// Returns `true` if fitness is cached.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_evaluated()
    }

    /// Returns the cached fitness, computing and caching it first if needed.
    pub fn evaluate<F>(&mut self, function: &F) -> f64
    where
        F: FitnessFunction<Genotype = G> + ?Sized,
    {
        match self.fitness {
            Fitness::Evaluated(v) => v,
            Fitness::Unevaluated => {
                let v = function.evaluate(&self.genotype);
                self.fitness = Fitness::Evaluated(v);
                v
            }
        }
    }

    /// Drops the cached fitness.
    pub fn invalidate(&mut self) {
        self.fitness = Fitness::Unevaluated;
    }

    /// Mutates the genotype in place with probability `p`.
    ///
    /// The cached fitness is invalidated only if the genotype changed.
    pub fn mutate<R: Rng>(&mut self, p: f64, rng: &mut R) -> bool {
        let changed = self.genotype.mutate(p, rng);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Produces two unevaluated offspring with freshly built genotypes.
    pub fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        let (a, b) = self.genotype.crossover(&other.genotype, rng);
        (Self::new(a), Self::new(b))
    }
}
