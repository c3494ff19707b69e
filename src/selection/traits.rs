//! Selection method trait
//!
//! Selection reduces an oversized, fitness-evaluated candidate pool back
//! to a target size, weighted by fitness.

use rand::Rng;

use crate::chromosome::traits::Chromosome;
use crate::error::{EvolutionError, SelectionError};

/// Largest allowed random-offspring fraction
pub const MAX_EPSILON: f64 = 0.5;

/// A survivor-selection policy
///
/// Strategies are stateless configuration objects; all randomness comes
/// from the caller-supplied generator, so identical input and generator
/// state produce identical output.
pub trait SelectionMethod<C: Chromosome>: Send + Sync {
    /// Replace the contents of `chromosomes` in place with exactly
    /// `target_size` members chosen by policy. Inputs must already be
    /// fitness-evaluated. Outputs are retained winners, independent
    /// clones, or freshly generated offspring, never aliases of
    /// discarded inputs.
    ///
    /// # Panics
    /// Panics if the pool is smaller than `target_size`; the engine
    /// upholds this invariant.
    ///
    /// # Errors
    /// Propagates [`SelectionError`] per the strategy's documented
    /// degenerate-fitness policy.
    fn apply_selection<R: Rng>(
        &self,
        chromosomes: &mut Vec<C>,
        target_size: usize,
        rng: &mut R,
    ) -> Result<(), SelectionError>;
}

/// Validate an epsilon fraction at the configuration boundary
pub(crate) fn validate_epsilon(epsilon: f64) -> Result<f64, EvolutionError> {
    if !(0.0..=MAX_EPSILON).contains(&epsilon) {
        return Err(EvolutionError::Configuration(format!(
            "epsilon must be in [0, {}], got {}",
            MAX_EPSILON, epsilon
        )));
    }
    Ok(epsilon)
}

/// Number of selection slots reserved for fresh random offspring
pub(crate) fn random_injection_count(epsilon: f64, target_size: usize) -> usize {
    (epsilon * target_size as f64).floor() as usize
}

/// Index of the highest-fitness member (earliest on ties)
pub(crate) fn best_index<C: Chromosome>(chromosomes: &[C]) -> usize {
    let mut best = 0;
    for (i, candidate) in chromosomes.iter().enumerate().skip(1) {
        if candidate.fitness() > chromosomes[best].fitness() {
            best = i;
        }
    }
    best
}
