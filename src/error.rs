//! Error types.
//!
//! Invalid parameters are reported as [`ConfigError`] when an engine or a
//! problem instance is constructed. Runtime failures of the evolutionary
//! loop are reported as [`EaError`].

/// A rejected construction parameter.
///
/// Parameters are never clamped into range; any out-of-range value fails
/// construction with one of these variants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    PopulationSize,
    #[error("genotype length must be at least 1")]
    GenotypeLength,
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("tournament size must be at least 1")]
    TournamentSize,
    #[error("stagnation limit must be at least 1 generation")]
    StagnationLimit,
    #[error("target fitness must be finite, got {0}")]
    TargetFitness(f64),
    #[error("time limit must be positive")]
    TimeLimit,
    #[error("item arrays differ in length: {values} values, {weights} weights")]
    MismatchedItems { values: usize, weights: usize },
    #[error("item {0} totals overflow a 64-bit sum")]
    ItemTotalOverflow(&'static str),
    #[error("cities {first} and {second} share the same coordinates")]
    DuplicateCity { first: usize, second: usize },
    #[error("city {index} has a non-finite coordinate")]
    NonFiniteCity { index: usize },
    #[error("not a permutation of 0..{len}")]
    InvalidPermutation { len: usize },
}

/// Errors raised while running the evolutionary loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EaError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("population is empty")]
    EmptyPopulation,
    #[error("individual {index} has not been evaluated")]
    Unevaluated { index: usize },
}

/// Shorthand for results carrying an [`EaError`].
pub type Result<T> = std::result::Result<T, EaError>;
