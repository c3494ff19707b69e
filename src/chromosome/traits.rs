//! Core chromosome trait
//!
//! This module defines the [`Chromosome`] capability trait implemented by
//! every candidate-solution encoding.

use std::cmp::Ordering;

use rand::Rng;

use crate::error::ChromosomeError;
use crate::fitness::FitnessFunction;

/// A candidate solution subject to evolutionary operators.
///
/// Implementations own their genotype exclusively and cache a scalar
/// fitness that is only meaningful after the current epoch's evaluate
/// pass. All mutating operations act on the receiver in place.
///
/// Randomness is always supplied by the caller, so behavior is
/// reproducible with a seeded generator and independent across engine
/// instances.
pub trait Chromosome: Clone + Send + Sync + 'static {
    /// Re-initialize the genotype in place with random content of the
    /// same shape. The cached fitness becomes stale.
    fn generate<R: Rng>(&mut self, rng: &mut R);

    /// Create a new randomly generated chromosome of the same genotype
    /// shape. Used for seeding populations and for random injection by
    /// selection strategies.
    fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self;

    /// Recombine the receiver with `peer` in place, turning both into
    /// offspring. The operator is encoding-specific (point crossover for
    /// fixed-length vectors, subtree exchange for trees).
    ///
    /// # Errors
    /// Returns [`ChromosomeError`] when the two encodings are
    /// incompatible (e.g. differing lengths). The engine propagates the
    /// error unchanged.
    fn crossover<R: Rng>(&mut self, peer: &mut Self, rng: &mut R) -> Result<(), ChromosomeError>;

    /// Randomly perturb the genotype in place.
    fn mutate<R: Rng>(&mut self, rng: &mut R);

    /// The cached fitness value. Meaningful only after
    /// [`evaluate`](Chromosome::evaluate) has run in the current epoch.
    fn fitness(&self) -> f64;

    /// Store a computed fitness value.
    fn set_fitness(&mut self, fitness: f64);

    /// Compute and cache fitness by invoking the external objective.
    fn evaluate<F>(&mut self, fitness: &F)
    where
        F: FitnessFunction<Chromosome = Self>,
        Self: Sized,
    {
        let value = fitness.evaluate(self);
        self.set_fitness(value);
    }

    /// Total order by fitness ascending. Selection strategies rely on
    /// this ordering; incomparable values (NaN) collapse to `Equal`.
    fn compare_fitness(&self, other: &Self) -> Ordering {
        self.fitness()
            .partial_cmp(&other.fitness())
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::FnFitness;

    // Minimal chromosome for exercising the provided methods
    #[derive(Clone, Debug, PartialEq)]
    struct Scalar {
        value: f64,
        fitness: f64,
    }

    impl Scalar {
        fn new(value: f64) -> Self {
            Self {
                value,
                fitness: 0.0,
            }
        }
    }

    impl Chromosome for Scalar {
        fn generate<R: Rng>(&mut self, rng: &mut R) {
            self.value = rng.gen_range(-1.0..1.0);
        }

        fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self {
            let mut child = self.clone();
            child.generate(rng);
            child.fitness = 0.0;
            child
        }

        fn crossover<R: Rng>(
            &mut self,
            peer: &mut Self,
            _rng: &mut R,
        ) -> Result<(), ChromosomeError> {
            let mid = (self.value + peer.value) / 2.0;
            self.value = mid;
            peer.value = mid;
            Ok(())
        }

        fn mutate<R: Rng>(&mut self, rng: &mut R) {
            self.value += rng.gen_range(-0.1..0.1);
        }

        fn fitness(&self) -> f64 {
            self.fitness
        }

        fn set_fitness(&mut self, fitness: f64) {
            self.fitness = fitness;
        }
    }

    #[test]
    fn test_evaluate_caches_fitness() {
        let fitness = FnFitness::new(|c: &Scalar| c.value * 2.0);
        let mut chromo = Scalar::new(3.0);

        chromo.evaluate(&fitness);
        assert_eq!(chromo.fitness(), 6.0);
    }

    #[test]
    fn test_compare_fitness_ascending() {
        let mut low = Scalar::new(0.0);
        let mut high = Scalar::new(0.0);
        low.set_fitness(1.0);
        high.set_fitness(5.0);

        assert_eq!(low.compare_fitness(&high), Ordering::Less);
        assert_eq!(high.compare_fitness(&low), Ordering::Greater);
        assert_eq!(low.compare_fitness(&low.clone()), Ordering::Equal);
    }

    #[test]
    fn test_compare_fitness_nan_collapses_to_equal() {
        let mut a = Scalar::new(0.0);
        let b = Scalar::new(0.0);
        a.set_fitness(f64::NAN);

        assert_eq!(a.compare_fitness(&b), Ordering::Equal);
    }
}
