//! 0/1 knapsack over a bitstring genotype.
//!
//! Bit `i` set means item `i` is packed. Over-capacity selections are not
//! discarded: their value is scaled by `capacity / total_weight`, which keeps
//! them comparable and pulls selection toward feasibility.

use rand::Rng;

use crate::error::ConfigError;
use crate::ga::{BitString, FitnessFunction, Genotype, Problem};

/// Upper bound (inclusive) of randomly generated item weights.
pub const MAX_RANDOM_WEIGHT: u64 = 10;

/// An immutable knapsack problem instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackInstance {
    values: Vec<u64>,
    weights: Vec<u64>,
    capacity: u64,
}

/// Totals of one packing, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnapsackSummary {
    pub total_value: u64,
    pub total_weight: u64,
    pub feasible: bool,
}

impl KnapsackInstance {
    /// Creates an instance whose capacity is half the total weight,
    /// rounded down.
    ///
    /// Fails if the summed values or summed weights overflow `u64`, so no
    /// packing total can overflow later.
    pub fn new(values: Vec<u64>, weights: Vec<u64>) -> Result<Self, ConfigError> {
        if values.len() != weights.len() {
            return Err(ConfigError::MismatchedItems {
                values: values.len(),
                weights: weights.len(),
            });
        }
        if values.is_empty() {
            return Err(ConfigError::GenotypeLength);
        }
        checked_total(&values).ok_or(ConfigError::ItemTotalOverflow("value"))?;
        let total_weight =
            checked_total(&weights).ok_or(ConfigError::ItemTotalOverflow("weight"))?;
        let capacity = total_weight / 2;
        Ok(Self {
            values,
            weights,
            capacity,
        })
    }

    /// Random instance of `n` items: item `i` is worth `i + 1`, weights are
    /// uniform in `1..=10`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Result<Self, ConfigError> {
        let values = (1..=n as u64).collect();
        let weights = (0..n)
            .map(|_| rng.random_range(1..=MAX_RANDOM_WEIGHT))
            .collect();
        Self::new(values, weights)
    }

    /// Replaces the derived capacity.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; instances have at least one item.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Item values.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Item weights.
    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    /// Maximum feasible total weight.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Total value and weight of the items selected by `genotype`.
    pub fn summarize(&self, genotype: &BitString) -> KnapsackSummary {
        let (total_value, total_weight) = genotype
            .selected()
            .filter(|&i| i < self.values.len())
            .fold((0, 0), |(v, w), i| (v + self.values[i], w + self.weights[i]));
        KnapsackSummary {
            total_value,
            total_weight,
            feasible: total_weight <= self.capacity,
        }
    }
}

fn checked_total(items: &[u64]) -> Option<u64> {
    items.iter().try_fold(0u64, |acc, &x| acc.checked_add(x))
}

impl FitnessFunction for KnapsackInstance {
    type Genotype = BitString;

    fn evaluate(&self, genotype: &BitString) -> f64 {
        let s = self.summarize(genotype);
        if s.feasible {
            s.total_value as f64
        } else {
            // total_weight > capacity >= 0 here
            s.total_value as f64 * (self.capacity as f64 / s.total_weight as f64)
        }
    }
}

impl Problem for KnapsackInstance {
    fn genotype_len(&self) -> usize {
        self.values.len()
    }

    fn random_genotype<R: Rng>(&self, rng: &mut R) -> BitString {
        let g = BitString::random(self.values.len(), rng);
        debug_assert!(g.is_valid(self.values.len()));
        g
    }
}
