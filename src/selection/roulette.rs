//! Roulette-wheel selection
//!
//! Fitness-proportional survivor selection.

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::chromosome::traits::Chromosome;
use crate::error::{EvolutionError, SelectionError};
use crate::selection::traits::{
    best_index, random_injection_count, validate_epsilon, SelectionMethod,
};

/// Roulette-wheel (fitness-proportionate) selection
///
/// Each draw picks a pool member with probability proportional to its
/// share of the total fitness and clones it into the next generation.
/// Requires non-negative fitness values with a positive total.
///
/// # Degenerate fitness
///
/// A pool whose total fitness is zero or negative cannot form a
/// proportional wheel. The policy here is to reject with
/// [`SelectionError::DegenerateFitness`] rather than silently fall back
/// to uniform sampling, which would mask a broken objective function.
///
/// An `epsilon` fraction of the target slots can be reserved for fresh
/// offspring of the best pool member, injecting diversity against
/// premature convergence.
#[derive(Clone, Debug)]
pub struct RouletteWheelSelection {
    epsilon: f64,
}

impl RouletteWheelSelection {
    /// Create a roulette-wheel selection with no random injection
    pub fn new() -> Self {
        Self { epsilon: 0.0 }
    }

    /// Create with a random-offspring fraction
    ///
    /// # Errors
    /// Returns [`EvolutionError::Configuration`] if `epsilon` is outside
    /// `[0, 0.5]`.
    pub fn with_epsilon(epsilon: f64) -> Result<Self, EvolutionError> {
        Ok(Self {
            epsilon: validate_epsilon(epsilon)?,
        })
    }

    /// The configured random-offspring fraction
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for RouletteWheelSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chromosome> SelectionMethod<C> for RouletteWheelSelection {
    fn apply_selection<R: Rng>(
        &self,
        chromosomes: &mut Vec<C>,
        target_size: usize,
        rng: &mut R,
    ) -> Result<(), SelectionError> {
        assert!(
            chromosomes.len() >= target_size,
            "selection pool must be at least the target size"
        );

        let random_amount = random_injection_count(self.epsilon, target_size);
        let wheel_draws = target_size - random_amount;

        let weights: Vec<f64> = chromosomes.iter().map(|c| c.fitness()).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(SelectionError::DegenerateFitness { total });
        }
        let wheel = WeightedIndex::new(&weights)
            .map_err(|_| SelectionError::DegenerateFitness { total })?;

        let mut next = Vec::with_capacity(target_size);
        for _ in 0..wheel_draws {
            next.push(chromosomes[wheel.sample(rng)].clone());
        }
        if random_amount > 0 {
            let best = &chromosomes[best_index(chromosomes)];
            for _ in 0..random_amount {
                next.push(best.create_offspring(rng));
            }
        }

        *chromosomes = next;
        Ok(())
    }
}
