//! The two built-in genotype representations.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::operators;
use super::types::Genotype;
use crate::error::ConfigError;

/// A fixed-length sequence of booleans.
///
/// Mutation flips each bit independently; crossover is single-point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString(Vec<bool>);

impl BitString {
    /// Wraps an existing bit vector.
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// Uniformly random bits.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// The bits, in order.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Indices of set bits.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| if b { Some(i) } else { None })
    }
}

impl Genotype for BitString {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn mutate<R: Rng>(&mut self, p: f64, rng: &mut R) -> bool {
        operators::bit_flip_mutation(&mut self.0, p, rng) > 0
    }

    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        let (a, b) = operators::single_point_crossover(&self.0, &other.0, rng);
        (Self(a), Self(b))
    }

    fn is_valid(&self, expected_len: usize) -> bool {
        self.0.len() == expected_len
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// An ordering of the integers `0..n`, each appearing exactly once.
///
/// Mutation is a single swap event; crossover is Order Crossover (OX).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Wraps `order` if it is a bijection on `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Option<Self> {
        if operators::is_permutation(&order, order.len()) {
            Some(Self(order))
        } else {
            None
        }
    }

    /// The identity ordering `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// A uniformly random shuffle of `0..n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self(order)
    }

    /// The ordering as a slice.
    pub fn order(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = ConfigError;

    fn try_from(order: Vec<usize>) -> Result<Self, ConfigError> {
        let len = order.len();
        Self::new(order).ok_or(ConfigError::InvalidPermutation { len })
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}

impl Genotype for Permutation {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn mutate<R: Rng>(&mut self, p: f64, rng: &mut R) -> bool {
        if rng.random_bool(p) {
            operators::swap_mutation(&mut self.0, rng)
        } else {
            false
        }
    }

    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        if self.0.is_empty() {
            return (self.clone(), other.clone());
        }
        let (a, b) = operators::order_crossover(&self.0, &other.0, rng);
        (Self(a), Self(b))
    }

    fn is_valid(&self, expected_len: usize) -> bool {
        operators::is_permutation(&self.0, expected_len)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, city) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{city}")?;
        }
        Ok(())
    }
}
