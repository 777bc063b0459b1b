//! Evolutionary algorithm engine for combinatorial optimization.
//!
//! Provides a generic generational EA and two problem instantiations:
//!
//! - **0/1 Knapsack**: bitstring genotype, single-point crossover, per-bit
//!   flip mutation, fitness = packed value scaled down when over capacity.
//! - **Traveling Salesman**: permutation genotype, Order Crossover (OX),
//!   swap mutation, fitness = inverse closed-tour length.
//!
//! Parents are chosen by tournament or roulette-wheel selection. Each engine
//! owns one seeded random stream, so a run is reproducible from its seed;
//! fitness evaluation can be spread across threads without changing results.
//!
//! # Example
//!
//! ```
//! use evocomb::ga::{EaConfig, EvolutionEngine, Genotype};
//! use evocomb::problems::TspInstance;
//!
//! let cities = TspInstance::on_unit_circle(8).unwrap();
//! let config = EaConfig::tsp().with_generations(20).with_seed(1);
//! let result = EvolutionEngine::new(cities.clone(), config).unwrap().run().unwrap();
//! assert!(result.best.genotype().is_valid(8));
//! println!("tour {} length {:.3}", result.best.genotype(), cities.tour_length(result.best.genotype()));
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and installs no logger.

pub mod error;
pub mod ga;
pub mod problems;

pub use error::{ConfigError, EaError, Result};
