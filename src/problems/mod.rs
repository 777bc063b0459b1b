//! Problem instances the engine ships with.
//!
//! - [`KnapsackInstance`]: 0/1 knapsack on [`BitString`](crate::ga::BitString)
//!   with a proportional over-capacity penalty
//! - [`TspInstance`]: Euclidean TSP on [`Permutation`](crate::ga::Permutation),
//!   scored as inverse closed-tour length

mod knapsack;
mod tsp;

pub use knapsack::{KnapsackInstance, KnapsackSummary, MAX_RANDOM_WEIGHT};
pub use tsp::{City, TspInstance};
