//! Generational evolutionary algorithm.
//!
//! A generic engine built on trait-based abstractions. A problem plugs in by
//! implementing [`Problem`] (random initialization) on top of
//! [`FitnessFunction`] (scoring), over a [`Genotype`] that knows how to
//! mutate and recombine itself.
//!
//! # Core Traits
//!
//! - [`Genotype`]: encoded candidate with `mutate` and `crossover`
//! - [`FitnessFunction`]: pure genotype → score mapping (higher is better)
//! - [`Problem`]: fitness function plus random genotype construction
//!
//! # Key Types
//!
//! - [`BitString`], [`Permutation`]: the two built-in representations
//! - [`Individual`]: genotype with a lazily cached [`Fitness`]
//! - [`Population`]: ordered individuals, sortable best first
//! - [`Selection`]: tournament or roulette-wheel parent selection
//! - [`EaConfig`]: run parameters
//! - [`EvolutionEngine`]: the generational loop
//! - [`RunResult`]: best individual, final population and history
//!
//! # Submodules
//!
//! - [`operators`]: crossover and mutation on raw gene slices
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*

mod config;
mod engine;
mod genotype;
mod individual;
pub mod operators;
mod population;
mod selection;
mod stopping;
mod types;

pub use config::EaConfig;
pub use engine::{EvolutionEngine, Phase, RunResult};
pub use genotype::{BitString, Permutation};
pub use individual::{Fitness, Individual};
pub use population::Population;
pub use selection::Selection;
pub use stopping::{GenerationStats, StopPredicate, StopReason};
pub use types::{FitnessFunction, Genotype, Problem};
