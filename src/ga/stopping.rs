//! Per-generation statistics and early-stopping rules.
//!
//! The fixed generation count always applies. Stagnation, target fitness,
//! time limit and cancellation are optional extras checked between
//! generations; [`StopPredicate`] lets a host plug in its own rule.

use super::config::EaConfig;

/// Fitness summary of one evaluated, sorted generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Highest fitness in the generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Lowest fitness.
    pub worst_fitness: f64,
}

impl GenerationStats {
    /// Summarizes `fitnesses` sorted best first.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_sorted(generation: usize, fitnesses: &[f64]) -> Option<Self> {
        let best_fitness = *fitnesses.first()?;
        let worst_fitness = *fitnesses.last()?;
        let mean_fitness = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;
        Some(Self {
            generation,
            best_fitness,
            mean_fitness,
            worst_fitness,
        })
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// All configured generations ran.
    GenerationsExhausted,
    /// Best fitness did not improve for the stagnation window.
    Stagnation,
    /// Best fitness reached the configured target.
    TargetReached,
    /// Wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
    /// A host-supplied predicate asked to stop.
    Predicate,
}

/// Host-supplied stopping rule, called with the history so far (most recent
/// generation last).
pub type StopPredicate = Box<dyn FnMut(&[GenerationStats]) -> bool + Send>;

/// Tracks the built-in stopping rules across a run.
#[derive(Debug, Clone)]
pub(crate) struct StopTracker {
    stagnation_limit: Option<usize>,
    target_fitness: Option<f64>,
    best_so_far: f64,
    stagnant: usize,
}

impl StopTracker {
    pub(crate) fn new(config: &EaConfig) -> Self {
        Self {
            stagnation_limit: config.stagnation_limit,
            target_fitness: config.target_fitness,
            best_so_far: f64::NEG_INFINITY,
            stagnant: 0,
        }
    }

    /// Feeds one generation; returns the rule that fired, if any.
    pub(crate) fn observe(&mut self, stats: &GenerationStats) -> Option<StopReason> {
        if stats.best_fitness > self.best_so_far {
            self.best_so_far = stats.best_fitness;
            self.stagnant = 0;
        } else {
            self.stagnant += 1;
        }

        if let Some(target) = self.target_fitness {
            if stats.best_fitness >= target {
                return Some(StopReason::TargetReached);
            }
        }
        match self.stagnation_limit {
            Some(window) if self.stagnant >= window => Some(StopReason::Stagnation),
            _ => None,
        }
    }
}
