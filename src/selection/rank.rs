//! Rank selection
//!
//! Survivor selection weighted by fitness rank rather than raw fitness
//! magnitude.

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::chromosome::traits::Chromosome;
use crate::error::{EvolutionError, SelectionError};
use crate::selection::traits::{random_injection_count, validate_epsilon, SelectionMethod};

/// Rank-based selection
///
/// The pool is stably sorted by fitness and each member receives a wheel
/// slice proportional to its rank: slices N, N-1, ..., 1 from best to
/// worst over a wheel of total size N(N+1)/2. This decouples selection
/// pressure from raw fitness magnitude.
///
/// The rank wheel's total is positive by construction, so rank selection
/// is well-defined for any finite fitness values and never raises
/// [`SelectionError::DegenerateFitness`]; raw fitness only drives the
/// sort.
///
/// An `epsilon` fraction of the target slots can be reserved for fresh
/// offspring of the best pool member.
#[derive(Clone, Debug)]
pub struct RankSelection {
    epsilon: f64,
}

impl RankSelection {
    /// Create a rank selection with no random injection
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

impl Default for RankSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chromosome> SelectionMethod<C> for RankSelection {
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

        let mut sorted = std::mem::take(chromosomes);
        sorted.sort_by(|a, b| b.compare_fitness(a));

        let n = sorted.len();
        let weights: Vec<f64> = (0..n).map(|rank| (n - rank) as f64).collect();
        let wheel = WeightedIndex::new(&weights).expect("rank weights are positive");

        let mut next = Vec::with_capacity(target_size);
        for _ in 0..wheel_draws {
            next.push(sorted[wheel.sample(rng)].clone());
        }
        for _ in 0..random_amount {
            next.push(sorted[0].create_offspring(rng));
        }

        *chromosomes = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::bounds::Bounds;
    use crate::chromosome::vector::VectorChromosome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn member(tag: f64, fitness: f64) -> VectorChromosome {
        let mut c = VectorChromosome::new(vec![tag], Bounds::symmetric(100.0));
        c.set_fitness(fitness);
        c
    }

    #[test]
    fn test_output_has_target_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool: Vec<_> = (0..15).map(|i| member(i as f64, i as f64)).collect();

        RankSelection::new()
            .apply_selection(&mut pool, 10, &mut rng)
            .unwrap();
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn test_probability_law_one_to_two() {
        let mut rng = StdRng::seed_from_u64(42);
        let selection = RankSelection::new();

        let mut low_count = 0u32;
        let mut high_count = 0u32;
        for _ in 0..100_000 {
            let mut pool = vec![member(1.0, 1.0), member(3.0, 3.0)];
            selection.apply_selection(&mut pool, 1, &mut rng).unwrap();
            if pool[0].genes()[0] == 1.0 {
                low_count += 1;
            } else {
                high_count += 1;
            }
        }

        // Rank slices on a 2-member wheel are 2 (best) and 1 (worst)
        let ratio = high_count as f64 / low_count as f64;
        assert!(
            (1.85..2.15).contains(&ratio),
            "expected ~1:2 selection ratio, got 1:{}",
            ratio
        );
    }

    #[test]
    fn test_zero_fitness_pool_is_accepted() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = vec![member(1.0, 0.0), member(2.0, 0.0), member(3.0, 0.0)];

        RankSelection::new()
            .apply_selection(&mut pool, 2, &mut rng)
            .unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_epsilon_reserves_fresh_offspring() {
        let mut rng = StdRng::seed_from_u64(42);
        let selection = RankSelection::with_epsilon(0.5).unwrap();

        let mut pool: Vec<_> = (0..10).map(|i| member(i as f64, (i + 1) as f64)).collect();
        selection.apply_selection(&mut pool, 10, &mut rng).unwrap();

        assert_eq!(pool.len(), 10);
        let fresh = pool.iter().filter(|c| c.fitness() == 0.0).count();
        assert_eq!(fresh, 5);
    }

    #[test]
    fn test_reproducible_with_same_seed() {
        let selection = RankSelection::new();
        let make_pool = || -> Vec<_> { (0..8).map(|i| member(i as f64, i as f64)).collect() };

        let mut rng1 = StdRng::seed_from_u64(99);
        let mut pool1 = make_pool();
        selection.apply_selection(&mut pool1, 6, &mut rng1).unwrap();

        let mut rng2 = StdRng::seed_from_u64(99);
        let mut pool2 = make_pool();
        selection.apply_selection(&mut pool2, 6, &mut rng2).unwrap();

        let tags1: Vec<f64> = pool1.iter().map(|c| c.genes()[0]).collect();
        let tags2: Vec<f64> = pool2.iter().map(|c| c.genes()[0]).collect();
        assert_eq!(tags1, tags2);
    }
}
