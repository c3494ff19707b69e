//! Elite selection
//!
//! Deterministic truncation selection with optional random injection.

use rand::Rng;

use crate::chromosome::traits::Chromosome;
use crate::error::{EvolutionError, SelectionError};
use crate::selection::traits::{random_injection_count, validate_epsilon, SelectionMethod};

/// Elite (truncation) selection
///
/// The pool is stably sorted by fitness and the worst members are
/// truncated away, keeping exactly the `target_size - randomAmount`
/// highest-fitness chromosomes, where `randomAmount =
/// floor(epsilon * target_size)`. The remaining slots are filled with
/// fresh offspring of the single best survivor, injecting diversity
/// against premature convergence.
///
/// Never raises [`SelectionError`]: elitism needs only the fitness
/// ordering, not fitness magnitudes.
#[derive(Clone, Debug)]
pub struct EliteSelection {
    epsilon: f64,
}

impl EliteSelection {
    /// Create an elite selection with no random injection
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

impl Default for EliteSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chromosome> SelectionMethod<C> for EliteSelection {
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
        let keep = target_size - random_amount;

        chromosomes.sort_by(|a, b| b.compare_fitness(a));
        chromosomes.truncate(keep);

        if random_amount > 0 {
            // epsilon <= 0.5 guarantees at least one survivor to breed from
            let best = chromosomes[0].clone();
            for _ in 0..random_amount {
                chromosomes.push(best.create_offspring(rng));
            }
        }
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
    fn test_keeps_exactly_the_best() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = vec![
            member(0.0, 5.0),
            member(1.0, 9.0),
            member(2.0, 1.0),
            member(3.0, 7.0),
            member(4.0, 3.0),
        ];

        EliteSelection::new()
            .apply_selection(&mut pool, 3, &mut rng)
            .unwrap();

        let fitnesses: Vec<f64> = pool.iter().map(|c| c.fitness()).collect();
        assert_eq!(fitnesses, vec![9.0, 7.0, 5.0]);
    }

    #[test]
    fn test_epsilon_replaces_worst_two_of_ten() {
        let mut rng = StdRng::seed_from_u64(42);
        let selection = EliteSelection::with_epsilon(0.2).unwrap();

        let mut pool: Vec<_> = (0..10)
            .map(|i| member(i as f64, 10.0 + i as f64))
            .collect();
        selection.apply_selection(&mut pool, 10, &mut rng).unwrap();

        assert_eq!(pool.len(), 10);

        // The 8 best originals (fitness 12..=19) survive unchanged,
        // best first; the 2 worst are replaced by fresh offspring
        let kept: Vec<f64> = pool[..8].iter().map(|c| c.fitness()).collect();
        assert_eq!(kept, vec![19.0, 18.0, 17.0, 16.0, 15.0, 14.0, 13.0, 12.0]);
        assert!(pool[8..].iter().all(|c| c.fitness() == 0.0));
    }

    #[test]
    fn test_no_kept_member_worse_than_any_discarded() {
        let mut rng = StdRng::seed_from_u64(42);
        let fitnesses = [4.0, 8.0, 15.0, 16.0, 23.0, 42.0];
        let mut pool: Vec<_> = fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| member(i as f64, f))
            .collect();

        EliteSelection::new()
            .apply_selection(&mut pool, 4, &mut rng)
            .unwrap();

        let min_kept = pool
            .iter()
            .map(|c| c.fitness())
            .fold(f64::INFINITY, f64::min);
        assert!(min_kept >= 15.0);
    }

    #[test]
    fn test_stable_order_on_ties() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = vec![
            member(0.0, 5.0),
            member(1.0, 5.0),
            member(2.0, 5.0),
            member(3.0, 5.0),
        ];

        EliteSelection::new()
            .apply_selection(&mut pool, 2, &mut rng)
            .unwrap();

        // Equal fitness resolves by the stable sort's prior order
        let tags: Vec<f64> = pool.iter().map(|c| c.genes()[0]).collect();
        assert_eq!(tags, vec![0.0, 1.0]);
    }

    #[test]
    fn test_offspring_bred_from_best_survivor_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let selection = EliteSelection::with_epsilon(0.5).unwrap();

        let mut pool: Vec<_> = (0..4).map(|i| member(i as f64, i as f64)).collect();
        selection.apply_selection(&mut pool, 4, &mut rng).unwrap();

        assert_eq!(pool.len(), 4);
        for offspring in &pool[2..] {
            assert_eq!(offspring.len(), 1);
            assert_eq!(offspring.fitness(), 0.0);
        }
    }
}
